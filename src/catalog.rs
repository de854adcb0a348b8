/// The fixed filter catalog. Order is stable and defines the order of the
/// thumbnail strip; the identity entry always comes first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Filter {
    NoFilters,
    GaussianBlur,
    Noir,
    ColorInvert,
    SepiaTone,
    Pixellate,
    Chrome,
    Fade,
    Instant,
    Mono,
    Process,
    Tonal,
    Transfer,
    TwirlDistortion,
    Vignette,
    UnsharpMask,
    BumpDistortion,
}

/// Parameter kinds a filter can declare. The engine only resolves and
/// assigns parameters a filter actually declares.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParamKind {
    /// Generic strength, fed the slider value directly.
    Intensity,
    /// Blur/sharpen reach, fed the slider value scaled by 200.
    Radius,
    /// Block/magnification size, fed the slider value scaled by 10.
    Scale,
    /// Geometric center of the image, for effects that distort around a point.
    Center,
}

impl Filter {
    pub const ALL: [Filter; 17] = [
        Filter::NoFilters,
        Filter::GaussianBlur,
        Filter::Noir,
        Filter::ColorInvert,
        Filter::SepiaTone,
        Filter::Pixellate,
        Filter::Chrome,
        Filter::Fade,
        Filter::Instant,
        Filter::Mono,
        Filter::Process,
        Filter::Tonal,
        Filter::Transfer,
        Filter::TwirlDistortion,
        Filter::Vignette,
        Filter::UnsharpMask,
        Filter::BumpDistortion,
    ];

    /// Engine-level name, with the vendor prefix and category words the
    /// display name strips off.
    pub fn engine_name(&self) -> &'static str {
        match self {
            Filter::NoFilters => "NoFilters",
            Filter::GaussianBlur => "FXGaussianBlur",
            Filter::Noir => "FXPhotoEffectNoir",
            Filter::ColorInvert => "FXColorInvert",
            Filter::SepiaTone => "FXSepiaTone",
            Filter::Pixellate => "FXPixellate",
            Filter::Chrome => "FXPhotoEffectChrome",
            Filter::Fade => "FXPhotoEffectFade",
            Filter::Instant => "FXPhotoEffectInstant",
            Filter::Mono => "FXPhotoEffectMono",
            Filter::Process => "FXPhotoEffectProcess",
            Filter::Tonal => "FXPhotoEffectTonal",
            Filter::Transfer => "FXPhotoEffectTransfer",
            Filter::TwirlDistortion => "FXTwirlDistortion",
            Filter::Vignette => "FXVignette",
            Filter::UnsharpMask => "FXUnsharpMask",
            Filter::BumpDistortion => "FXBumpDistortion",
        }
    }

    /// Human-readable name shown under each thumbnail, derived from the
    /// engine name by stripping the vendor/category substrings.
    pub fn display_name(&self) -> String {
        let mut name = self.engine_name().to_string();
        for noise in ["FX", "Photo", "Effect"] {
            name = name.replace(noise, "");
        }
        name
    }

    /// Resolve a filter from its engine-level name.
    pub fn for_engine_name(name: &str) -> Option<Filter> {
        Filter::ALL.iter().copied().find(|f| f.engine_name() == name)
    }

    /// The parameters this filter declares, driving both intensity mapping
    /// and slider visibility. Fixed looks declare nothing.
    pub fn params(&self) -> &'static [ParamKind] {
        match self {
            Filter::NoFilters => &[],
            Filter::GaussianBlur => &[ParamKind::Radius],
            Filter::Noir => &[],
            Filter::ColorInvert => &[],
            Filter::SepiaTone => &[ParamKind::Intensity],
            Filter::Pixellate => &[ParamKind::Scale, ParamKind::Center],
            Filter::Chrome => &[],
            Filter::Fade => &[],
            Filter::Instant => &[],
            Filter::Mono => &[],
            Filter::Process => &[],
            Filter::Tonal => &[],
            Filter::Transfer => &[],
            Filter::TwirlDistortion => &[ParamKind::Radius, ParamKind::Center],
            Filter::Vignette => &[ParamKind::Intensity, ParamKind::Radius],
            Filter::UnsharpMask => &[ParamKind::Radius, ParamKind::Intensity],
            Filter::BumpDistortion => &[ParamKind::Radius, ParamKind::Scale, ParamKind::Center],
        }
    }

    /// Whether the intensity slider does anything for this filter. Center
    /// alone is not tunable, it is derived from the image.
    pub fn has_tunable_parameter(&self) -> bool {
        self.params()
            .iter()
            .any(|p| !matches!(p, ParamKind::Center))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_starts_with_identity() {
        assert_eq!(Filter::ALL[0], Filter::NoFilters);
        assert!(!Filter::ALL.is_empty());
    }

    #[test]
    fn display_names_are_unique() {
        let names: HashSet<String> = Filter::ALL.iter().map(|f| f.display_name()).collect();
        assert_eq!(names.len(), Filter::ALL.len());
    }

    #[test]
    fn display_names_are_deterministic() {
        for filter in Filter::ALL {
            assert_eq!(filter.display_name(), filter.display_name());
        }
    }

    #[test]
    fn display_name_strips_vendor_and_category_words() {
        assert_eq!(Filter::NoFilters.display_name(), "NoFilters");
        assert_eq!(Filter::GaussianBlur.display_name(), "GaussianBlur");
        assert_eq!(Filter::ColorInvert.display_name(), "ColorInvert");
        assert_eq!(Filter::Noir.display_name(), "Noir");
        assert_eq!(Filter::Transfer.display_name(), "Transfer");
    }

    #[test]
    fn engine_names_round_trip() {
        for filter in Filter::ALL {
            assert_eq!(Filter::for_engine_name(filter.engine_name()), Some(filter));
        }
        assert_eq!(Filter::for_engine_name("FXNotARealFilter"), None);
    }

    #[test]
    fn fixed_looks_declare_no_parameters() {
        for filter in [
            Filter::Noir,
            Filter::Chrome,
            Filter::Fade,
            Filter::Instant,
            Filter::Mono,
            Filter::Process,
            Filter::Tonal,
            Filter::Transfer,
            Filter::ColorInvert,
        ] {
            assert!(filter.params().is_empty());
            assert!(!filter.has_tunable_parameter());
        }
        assert!(Filter::GaussianBlur.has_tunable_parameter());
        assert!(Filter::Pixellate.has_tunable_parameter());
        assert!(!Filter::NoFilters.has_tunable_parameter());
    }
}
