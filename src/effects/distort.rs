use image::{Rgba, RgbaImage};

/// Rotate pixels around the center, the rotation falling off toward the
/// edge of the effect radius.
pub fn twirl(image: &RgbaImage, radius: f32, center: (f32, f32)) -> RgbaImage {
    if radius <= 0.0 {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    let mut output = RgbaImage::new(width, height);
    let max_angle = std::f32::consts::PI;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center.0;
            let dy = y as f32 - center.1;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist >= radius {
                output.put_pixel(x, y, *image.get_pixel(x, y));
                continue;
            }

            let t = 1.0 - dist / radius;
            let angle = max_angle * t * t;
            let (sin, cos) = angle.sin_cos();
            let src_x = center.0 + dx * cos - dy * sin;
            let src_y = center.1 + dx * sin + dy * cos;
            output.put_pixel(x, y, sample_bilinear(image, src_x, src_y));
        }
    }

    output
}

/// Magnify the area around the center, easing back to identity at the
/// effect radius. Scale arrives on the engine's 0..10 range.
pub fn bump(image: &RgbaImage, radius: f32, scale: f32, center: (f32, f32)) -> RgbaImage {
    let amount = (scale / 10.0).clamp(0.0, 1.0) * 0.75;
    if radius <= 0.0 || amount <= 0.0 {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    let mut output = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center.0;
            let dy = y as f32 - center.1;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist >= radius {
                output.put_pixel(x, y, *image.get_pixel(x, y));
                continue;
            }

            let t = 1.0 - (dist / radius) * (dist / radius);
            let shrink = 1.0 - amount * t;
            let src_x = center.0 + dx * shrink;
            let src_y = center.1 + dy * shrink;
            output.put_pixel(x, y, sample_bilinear(image, src_x, src_y));
        }
    }

    output
}

/// Radial darkening toward the corners. Radius widens the untouched middle,
/// intensity sets how dark the corners go.
pub fn vignette(image: &RgbaImage, intensity: f32, radius: f32) -> RgbaImage {
    let strength = intensity.clamp(0.0, 1.0);
    if strength <= 0.0 {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt();
    let inner = (radius / 200.0).clamp(0.0, 0.9) * 0.5;

    let mut output = image.clone();
    for (x, y, p) in output.enumerate_pixels_mut() {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let dn = (dx * dx + dy * dy).sqrt() / max_dist;
        let falloff = ((dn - inner) / (1.0 - inner)).clamp(0.0, 1.0);
        let scale = 1.0 - strength * falloff * falloff;
        for i in 0..3 {
            p[i] = (p[i] as f32 * scale) as u8;
        }
    }

    output
}

/// Clamp-to-edge bilinear sampling, shared by the warps so their borders
/// don't pick up transparent black.
fn sample_bilinear(img: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let (width, height) = img.dimensions();
    let x = x.clamp(0.0, (width - 1) as f32);
    let y = y.clamp(0.0, (height - 1) as f32);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = img.get_pixel(x0, y0);
    let p10 = img.get_pixel(x1, y0);
    let p01 = img.get_pixel(x0, y1);
    let p11 = img.get_pixel(x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let top = p00[i] as f32 * (1.0 - fx) + p10[i] as f32 * fx;
        let bottom = p01[i] as f32 * (1.0 - fx) + p11[i] as f32 * fx;
        result[i] = (top * (1.0 - fy) + bottom * fy).clamp(0.0, 255.0) as u8;
    }

    Rgba(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 5 % 256) as u8, (y * 5 % 256) as u8, 128, 255])
        })
    }

    #[test]
    fn zero_radius_warps_are_identity() {
        let image = gradient(20, 20);
        assert_eq!(twirl(&image, 0.0, (10.0, 10.0)).as_raw(), image.as_raw());
        assert_eq!(bump(&image, 0.0, 5.0, (10.0, 10.0)).as_raw(), image.as_raw());
    }

    #[test]
    fn twirl_leaves_pixels_outside_the_radius_alone() {
        let image = gradient(40, 40);
        let out = twirl(&image, 5.0, (20.0, 20.0));
        assert_eq!(out.get_pixel(0, 0), image.get_pixel(0, 0));
        assert_eq!(out.get_pixel(39, 39), image.get_pixel(39, 39));
    }

    #[test]
    fn vignette_darkens_corners_more_than_the_center() {
        let image = RgbaImage::from_pixel(41, 41, Rgba([200, 200, 200, 255]));
        let out = vignette(&image, 1.0, 0.0);
        let center = out.get_pixel(20, 20)[0];
        let corner = out.get_pixel(0, 0)[0];
        assert!(corner < center);
        assert!(corner < 200);
    }

    #[test]
    fn vignette_keeps_alpha() {
        let image = RgbaImage::from_pixel(9, 9, Rgba([50, 50, 50, 137]));
        let out = vignette(&image, 0.8, 100.0);
        assert_eq!(out.get_pixel(0, 0)[3], 137);
    }
}
