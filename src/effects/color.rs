use image::{Rgba, RgbaImage};

fn luma(p: &Rgba<u8>) -> f32 {
    0.299 * p[0] as f32 + 0.587 * p[1] as f32 + 0.114 * p[2] as f32
}

fn clamp_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Mix a channel toward its luma. Factor 0 is full grayscale, 1 leaves the
/// channel alone, above 1 boosts saturation.
fn saturate(channel: f32, gray: f32, factor: f32) -> f32 {
    gray + (channel - gray) * factor
}

/// Contrast pivoting around mid-gray, with an additive lift on top.
fn tone(v: f32, contrast: f32, lift: f32) -> f32 {
    (v - 128.0) * contrast + 128.0 + lift
}

fn map_pixels(image: &RgbaImage, f: impl Fn(&Rgba<u8>) -> [f32; 3]) -> RgbaImage {
    let mut output = image.clone();
    for p in output.pixels_mut() {
        let [r, g, b] = f(p);
        *p = Rgba([clamp_u8(r), clamp_u8(g), clamp_u8(b), p[3]]);
    }
    output
}

pub fn invert(image: &RgbaImage) -> RgbaImage {
    map_pixels(image, |p| {
        [
            255.0 - p[0] as f32,
            255.0 - p[1] as f32,
            255.0 - p[2] as f32,
        ]
    })
}

/// Classic sepia matrix, blended with the source by intensity so the slider
/// fades the effect in linearly.
pub fn sepia(image: &RgbaImage, intensity: f32) -> RgbaImage {
    let t = intensity.clamp(0.0, 1.0);
    map_pixels(image, |p| {
        let (r, g, b) = (p[0] as f32, p[1] as f32, p[2] as f32);
        let sr = r * 0.393 + g * 0.769 + b * 0.189;
        let sg = r * 0.349 + g * 0.686 + b * 0.168;
        let sb = r * 0.272 + g * 0.534 + b * 0.131;
        [
            r + (sr - r) * t,
            g + (sg - g) * t,
            b + (sb - b) * t,
        ]
    })
}

/// High-contrast black and white.
pub fn noir(image: &RgbaImage) -> RgbaImage {
    map_pixels(image, |p| {
        let v = tone(luma(p), 1.5, 0.0);
        [v, v, v]
    })
}

/// Plain grayscale.
pub fn mono(image: &RgbaImage) -> RgbaImage {
    map_pixels(image, |p| {
        let v = luma(p);
        [v, v, v]
    })
}

/// Grayscale with softened contrast and a slight lift.
pub fn tonal(image: &RgbaImage) -> RgbaImage {
    map_pixels(image, |p| {
        let v = tone(luma(p), 0.85, 6.0);
        [v, v, v]
    })
}

/// Punchy saturation and contrast boost.
pub fn chrome(image: &RgbaImage) -> RgbaImage {
    map_pixels(image, |p| {
        let gray = luma(p);
        [
            tone(saturate(p[0] as f32, gray, 1.35), 1.1, 0.0),
            tone(saturate(p[1] as f32, gray, 1.35), 1.1, 0.0),
            tone(saturate(p[2] as f32, gray, 1.35), 1.1, 0.0),
        ]
    })
}

/// Washed-out look: low saturation, compressed range, lifted blacks.
pub fn fade(image: &RgbaImage) -> RgbaImage {
    map_pixels(image, |p| {
        let gray = luma(p);
        [
            saturate(p[0] as f32, gray, 0.55) * 0.88 + 28.0,
            saturate(p[1] as f32, gray, 0.55) * 0.88 + 28.0,
            saturate(p[2] as f32, gray, 0.55) * 0.88 + 28.0,
        ]
    })
}

/// Instant-camera warmth with faded contrast.
pub fn instant(image: &RgbaImage) -> RgbaImage {
    map_pixels(image, |p| {
        [
            tone(p[0] as f32, 0.9, 0.0) * 1.05 + 14.0,
            tone(p[1] as f32, 0.9, 0.0) * 0.98 + 8.0,
            tone(p[2] as f32, 0.9, 0.0) * 0.86 + 4.0,
        ]
    })
}

/// Cross-processed cool cast, blues and greens pushed up.
pub fn process(image: &RgbaImage) -> RgbaImage {
    map_pixels(image, |p| {
        [
            tone(p[0] as f32 * 0.94, 1.05, 0.0),
            tone(p[1] as f32 * 1.03, 1.05, 2.0),
            tone(p[2] as f32 * 1.12, 1.05, 6.0),
        ]
    })
}

/// Warm transfer-print oranges.
pub fn transfer(image: &RgbaImage) -> RgbaImage {
    map_pixels(image, |p| {
        [
            p[0] as f32 * 1.12 + 10.0,
            p[1] as f32 * 1.0 + 2.0,
            p[2] as f32 * 0.82,
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(r: u8, g: u8, b: u8) -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba([r, g, b, 255]))
    }

    #[test]
    fn invert_flips_channels_and_keeps_alpha() {
        let out = invert(&solid(10, 100, 250));
        assert_eq!(*out.get_pixel(0, 0), Rgba([245, 155, 5, 255]));
    }

    #[test]
    fn sepia_at_zero_intensity_is_identity() {
        let image = solid(40, 90, 160);
        assert_eq!(sepia(&image, 0.0).as_raw(), image.as_raw());
    }

    #[test]
    fn sepia_at_full_intensity_is_the_full_matrix() {
        let out = sepia(&solid(100, 100, 100), 1.0);
        let p = out.get_pixel(0, 0);
        // 100 * (0.393 + 0.769 + 0.189) = 135.1, and so on per row.
        assert_eq!(p[0], 135);
        assert_eq!(p[1], 120);
        assert_eq!(p[2], 93);
    }

    #[test]
    fn grayscale_looks_have_equal_channels() {
        for out in [
            noir(&solid(200, 50, 120)),
            mono(&solid(200, 50, 120)),
            tonal(&solid(200, 50, 120)),
        ] {
            let p = out.get_pixel(0, 0);
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
        }
    }

    #[test]
    fn mono_matches_the_luma_weights() {
        let out = mono(&solid(200, 50, 120));
        // 0.299*200 + 0.587*50 + 0.114*120 = 102.83
        assert_eq!(out.get_pixel(0, 0)[0], 102);
    }

    #[test]
    fn transfer_warms_and_fade_lifts_blacks() {
        let warm = transfer(&solid(100, 100, 100));
        let p = warm.get_pixel(0, 0);
        assert!(p[0] > p[2]);

        let lifted = fade(&solid(0, 0, 0));
        assert!(lifted.get_pixel(0, 0)[0] > 0);
    }
}
