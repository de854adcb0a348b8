use image::RgbaImage;

use crate::catalog::{Filter, ParamKind};
use crate::effects;
use crate::error::FilterError;

/// One render request: which filter, at what slider value. A fresh spec is
/// built per invocation and never mutated across threads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSpec {
    pub filter: Filter,
    pub intensity: f32,
}

impl FilterSpec {
    pub fn new(filter: Filter, intensity: f32) -> Self {
        Self { filter, intensity }
    }
}

/// Slider-to-radius factor, mapping [0,1] onto a visually meaningful reach.
const RADIUS_FACTOR: f32 = 200.0;
/// Slider-to-scale factor for effects whose block/magnification size grows
/// with intensity.
const SCALE_FACTOR: f32 = 10.0;

/// The spec's intensity mapped onto the parameters the filter declares.
/// Undeclared parameters stay `None` and are never handed to an effect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolvedParams {
    pub intensity: Option<f32>,
    pub radius: Option<f32>,
    pub scale: Option<f32>,
    pub center: Option<(f32, f32)>,
}

pub fn resolve_params(spec: &FilterSpec, width: u32, height: u32) -> ResolvedParams {
    let mut params = ResolvedParams::default();
    for kind in spec.filter.params() {
        match kind {
            ParamKind::Intensity => params.intensity = Some(spec.intensity),
            ParamKind::Radius => params.radius = Some(spec.intensity * RADIUS_FACTOR),
            ParamKind::Scale => params.scale = Some(spec.intensity * SCALE_FACTOR),
            ParamKind::Center => {
                params.center = Some((width as f32 / 2.0, height as f32 / 2.0))
            }
        }
    }
    params
}

/// Applies exactly one named filter to exactly one image at one intensity.
/// Cheap to construct, one instance per in-flight render.
#[derive(Default)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, image: &RgbaImage, spec: &FilterSpec) -> Result<RgbaImage, FilterError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(FilterError::EmptySource { width, height });
        }

        // Identity never touches the effect machinery.
        if spec.filter == Filter::NoFilters {
            return Ok(image.clone());
        }

        let params = resolve_params(spec, width, height);
        let output = effects::render(spec.filter, image, &params);
        if output.width() == 0 || output.height() == 0 {
            return Err(FilterError::EmptyOutput);
        }
        Ok(output)
    }

    /// Resolve a filter by engine-level name, then apply it. Unregistered
    /// names are a real error, not a silent no-op.
    pub fn apply_named(
        &self,
        name: &str,
        image: &RgbaImage,
        intensity: f32,
    ) -> Result<RgbaImage, FilterError> {
        let filter = Filter::for_engine_name(name)
            .ok_or_else(|| FilterError::UnknownFilter(name.to_string()))?;
        self.apply(image, &FilterSpec::new(filter, intensity))
    }
}
