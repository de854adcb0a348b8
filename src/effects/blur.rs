use image::{Rgba, RgbaImage};
use imageproc::filter::gaussian_blur_f32;

/// The engine hands radii on a 0..200 range; the Gaussian sigma stays a
/// fraction of that so big radii remain tractable on the CPU.
const SIGMA_PER_RADIUS: f32 = 0.05;

pub fn gaussian(image: &RgbaImage, radius: f32) -> RgbaImage {
    let sigma = radius * SIGMA_PER_RADIUS;
    if sigma <= 0.0 {
        return image.clone();
    }
    gaussian_blur_f32(image, sigma)
}

pub fn unsharp_mask(image: &RgbaImage, radius: f32, amount: f32) -> RgbaImage {
    let sigma = radius * SIGMA_PER_RADIUS;
    if sigma <= 0.0 || amount <= 0.0 {
        return image.clone();
    }

    let blurred = gaussian_blur_f32(image, sigma);
    let mut output = image.clone();
    for (dst, (orig, soft)) in output
        .pixels_mut()
        .zip(image.pixels().zip(blurred.pixels()))
    {
        for i in 0..3 {
            let detail = orig[i] as f32 - soft[i] as f32;
            let sharpened = orig[i] as f32 + detail * amount * 2.0;
            dst[i] = sharpened.clamp(0.0, 255.0) as u8;
        }
    }
    output
}

/// Block averaging with the grid anchored on the center point, so the
/// mosaic stays symmetric around the middle of the picture.
pub fn pixellate(image: &RgbaImage, scale: f32, center: (f32, f32)) -> RgbaImage {
    let block = scale.round() as i64;
    if block <= 1 {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    let mut output = RgbaImage::new(width, height);
    let anchor_x = (center.0 as i64).rem_euclid(block);
    let anchor_y = (center.1 as i64).rem_euclid(block);

    let mut by = anchor_y - block;
    while by < height as i64 {
        let mut bx = anchor_x - block;
        while bx < width as i64 {
            let x0 = bx.max(0) as u32;
            let y0 = by.max(0) as u32;
            let x1 = (bx + block).clamp(0, width as i64) as u32;
            let y1 = (by + block).clamp(0, height as i64) as u32;
            if x0 < x1 && y0 < y1 {
                let avg = block_average(image, x0, y0, x1, y1);
                for y in y0..y1 {
                    for x in x0..x1 {
                        output.put_pixel(x, y, avg);
                    }
                }
            }
            bx += block;
        }
        by += block;
    }

    output
}

fn block_average(image: &RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) -> Rgba<u8> {
    let mut sum = [0u64; 4];
    for y in y0..y1 {
        for x in x0..x1 {
            let p = image.get_pixel(x, y);
            for i in 0..4 {
                sum[i] += p[i] as u64;
            }
        }
    }
    let count = ((x1 - x0) as u64) * ((y1 - y0) as u64);
    Rgba([
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
        (sum[3] / count) as u8,
    ])
}
