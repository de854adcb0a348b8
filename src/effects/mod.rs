mod blur;
mod color;
mod distort;

use image::RgbaImage;

use crate::catalog::Filter;
use crate::engine::ResolvedParams;

/// Single dispatch point from a catalog entry to its pixel implementation.
/// Every effect only reads the parameters its catalog entry declares.
pub fn render(filter: Filter, image: &RgbaImage, params: &ResolvedParams) -> RgbaImage {
    match filter {
        Filter::NoFilters => image.clone(),
        Filter::GaussianBlur => blur::gaussian(image, params.radius.unwrap_or(0.0)),
        Filter::UnsharpMask => blur::unsharp_mask(
            image,
            params.radius.unwrap_or(0.0),
            params.intensity.unwrap_or(0.0),
        ),
        Filter::Pixellate => blur::pixellate(
            image,
            params.scale.unwrap_or(0.0),
            params.center.unwrap_or((0.0, 0.0)),
        ),
        Filter::ColorInvert => color::invert(image),
        Filter::SepiaTone => color::sepia(image, params.intensity.unwrap_or(0.0)),
        Filter::Noir => color::noir(image),
        Filter::Chrome => color::chrome(image),
        Filter::Fade => color::fade(image),
        Filter::Instant => color::instant(image),
        Filter::Mono => color::mono(image),
        Filter::Process => color::process(image),
        Filter::Tonal => color::tonal(image),
        Filter::Transfer => color::transfer(image),
        Filter::TwirlDistortion => distort::twirl(
            image,
            params.radius.unwrap_or(0.0),
            params.center.unwrap_or((0.0, 0.0)),
        ),
        Filter::Vignette => distort::vignette(
            image,
            params.intensity.unwrap_or(0.0),
            params.radius.unwrap_or(0.0),
        ),
        Filter::BumpDistortion => distort::bump(
            image,
            params.radius.unwrap_or(0.0),
            params.scale.unwrap_or(0.0),
            params.center.unwrap_or((0.0, 0.0)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{resolve_params, FilterSpec};
    use image::{Rgba, RgbaImage};

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgba([220, 180, 40, 255])
            } else {
                Rgba([30, 60, 200, 255])
            }
        })
    }

    #[test]
    fn every_filter_preserves_dimensions() {
        let image = checker(48, 36);
        for filter in Filter::ALL {
            let params = resolve_params(&FilterSpec::new(filter, 0.7), 48, 36);
            let out = render(filter, &image, &params);
            assert_eq!(out.dimensions(), image.dimensions(), "{filter:?}");
        }
    }

    #[test]
    fn fixed_looks_ignore_intensity() {
        let image = checker(24, 24);
        for filter in [Filter::Noir, Filter::Mono, Filter::Chrome, Filter::Fade] {
            let low = render(filter, &image, &resolve_params(&FilterSpec::new(filter, 0.1), 24, 24));
            let high = render(filter, &image, &resolve_params(&FilterSpec::new(filter, 0.9), 24, 24));
            assert_eq!(low.as_raw(), high.as_raw(), "{filter:?}");
        }
    }

    #[test]
    fn zero_intensity_blur_is_the_input() {
        let image = checker(20, 20);
        let params = resolve_params(&FilterSpec::new(Filter::GaussianBlur, 0.0), 20, 20);
        let out = render(Filter::GaussianBlur, &image, &params);
        assert_eq!(out.as_raw(), image.as_raw());
    }
}
