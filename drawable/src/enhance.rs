//! Per channel colour enhancement of rgba buffers.
//!
//! Both adjustments interpolate every colour channel away from a degenerate
//! value and leave the alpha channel alone.

use image::RgbaImage;

/// Contrast factor applied to notification icons.
pub const CONTRAST: f32 = 1.5;

/// Brightness factor applied to notification icons.
pub const BRIGHTNESS: f32 = 1.2;

/// Extrapolates `value` away from `degenerate` by `factor`, saturating at the
/// channel bounds.
fn blend(degenerate: u8, value: u8, factor: f32) -> u8 {
    let degenerate = degenerate as f32;
    let out = degenerate + factor * (value as f32 - degenerate);
    if out <= 0.0 {
        0
    } else if out >= 255.0 {
        255
    } else {
        out as u8
    }
}

fn luma(r: u8, g: u8, b: u8) -> u32 {
    (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16
}

/// Rounded mean luma of every pixel in the buffer, transparent ones included.
pub fn mean_luma(img: &RgbaImage) -> u8 {
    let count = img.width() as u64 * img.height() as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = img
        .pixels()
        .map(|p| luma(p[0], p[1], p[2]) as u64)
        .sum();
    (sum as f64 / count as f64 + 0.5) as u8
}

/// Scales the distance of every colour channel from the mean luma.
pub fn adjust_contrast(img: &mut RgbaImage, factor: f32) {
    let mean = mean_luma(img);
    for pixel in img.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = blend(mean, *channel, factor);
        }
    }
}

/// Multiplies every colour channel by `factor`.
pub fn adjust_brightness(img: &mut RgbaImage, factor: f32) {
    for pixel in img.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = blend(0, *channel, factor);
        }
    }
}
