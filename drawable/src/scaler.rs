use crate::enhance::{adjust_brightness, adjust_contrast, BRIGHTNESS, CONTRAST};
use anyhow::{Context, Result};
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageEncoder, ImageReader, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Computes the dimensions of `width`x`height` shrunk to fit a `size`x`size`
/// box with the aspect ratio preserved.
///
/// Images that already fit are returned unchanged. The unconstrained axis is
/// rounded to whichever neighbouring integer keeps the aspect ratio closest,
/// and is never smaller than one pixel.
pub fn fit_within(width: u32, height: u32, size: u32) -> (u32, u32) {
    if width <= size && height <= size {
        return (width, height);
    }
    let aspect = width as f64 / height as f64;
    let bound = size as f64;
    if aspect <= 1.0 {
        let exact = bound * aspect;
        let w = closest(exact, |n| (aspect - n / bound).abs());
        (w, size)
    } else {
        let exact = bound / aspect;
        let h = closest(exact, |n| (aspect - bound / n).abs());
        (size, h)
    }
}

fn closest(exact: f64, error: impl Fn(f64) -> f64) -> u32 {
    let (floor, ceil) = (exact.floor(), exact.ceil());
    let best = if floor > 0.0 && error(floor) <= error(ceil) {
        floor
    } else {
        ceil
    };
    (best as u32).max(1)
}

/// Offset that centers an `inner` extent inside an `outer` one.
pub fn center_offset(outer: u32, inner: u32) -> i64 {
    (outer.saturating_sub(inner) / 2) as i64
}

/// Zeroes the colour of fully transparent pixels so it cannot leak into
/// the visible result.
fn clear_hidden(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        if pixel[3] == 0 {
            pixel.0 = [0; 4];
        }
    }
}

fn premultiply(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let a = pixel[3] as u32;
        for channel in &mut pixel.0[..3] {
            *channel = ((*channel as u32 * a + 127) / 255) as u8;
        }
    }
}

fn unpremultiply(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let a = pixel[3] as u32;
        if a == 0 {
            pixel.0 = [0; 4];
            continue;
        }
        for channel in &mut pixel.0[..3] {
            *channel = ((*channel as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

pub struct Scaler {
    img: RgbaImage,
}

impl Scaler {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = ImageReader::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .with_guessed_format()?
            .decode()
            .with_context(|| format!("failed to decode {}", path.display()))?
            .to_rgba8();
        Ok(Self::from_rgba(img))
    }

    pub fn from_rgba(mut img: RgbaImage) -> Self {
        clear_hidden(&mut img);
        Self { img }
    }

    /// Shrinks the image to fit `size` and centers it on a transparent
    /// `size`x`size` canvas.
    pub fn letterbox(&self, size: u32) -> RgbaImage {
        let (width, height) = self.img.dimensions();
        let (w, h) = fit_within(width, height, size);
        let mut canvas = RgbaImage::new(size, size);
        let x = center_offset(size, w);
        let y = center_offset(size, h);
        // src-over onto a fully transparent canvas is a plain copy, alpha included.
        // Resampling happens on premultiplied colour so hidden pixels add no halo.
        if (w, h) == (width, height) {
            image::imageops::replace(&mut canvas, &self.img, x, y);
        } else {
            let mut premultiplied = self.img.clone();
            premultiply(&mut premultiplied);
            let mut thumbnail =
                image::imageops::resize(&premultiplied, w, h, FilterType::Lanczos3);
            unpremultiply(&mut thumbnail);
            image::imageops::replace(&mut canvas, &thumbnail, x, y);
        }
        tracing::debug!("scaled {width}x{height} to {w}x{h} at ({x}, {y}) in {size}x{size}");
        canvas
    }

    /// Renders the enhanced notification icon of `size`x`size` pixels.
    pub fn render(&self, size: u32) -> RgbaImage {
        let mut icon = self.letterbox(size);
        adjust_contrast(&mut icon, CONTRAST);
        adjust_brightness(&mut icon, BRIGHTNESS);
        icon
    }

    pub fn write<W: Write>(&self, w: W, size: u32) -> Result<()> {
        write_png(&self.render(size), w)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P, size: u32) -> Result<()> {
        let path = path.as_ref();
        let mut f = BufWriter::new(File::create(path)?);
        self.write(&mut f, size)?;
        f.flush()?;
        Ok(())
    }
}

pub fn write_png<W: Write>(img: &RgbaImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn fit_within_keeps_small_images() {
        assert_eq!(fit_within(16, 16, 24), (16, 16));
        assert_eq!(fit_within(40, 20, 48), (40, 20));
        assert_eq!(fit_within(96, 96, 96), (96, 96));
    }

    #[test]
    fn fit_within_square() {
        assert_eq!(fit_within(512, 512, 24), (24, 24));
        assert_eq!(fit_within(100, 100, 96), (96, 96));
    }

    #[test]
    fn fit_within_wide() {
        assert_eq!(fit_within(100, 20, 48), (48, 10));
        assert_eq!(fit_within(200, 100, 36), (36, 18));
        assert_eq!(fit_within(1000, 1, 24), (24, 1));
    }

    #[test]
    fn fit_within_tall() {
        assert_eq!(fit_within(10, 100, 48), (5, 48));
        assert_eq!(fit_within(30, 100, 48), (14, 48));
        assert_eq!(fit_within(30, 60, 48), (24, 48));
    }

    #[test]
    fn center_offset_floors() {
        assert_eq!(center_offset(24, 24), 0);
        assert_eq!(center_offset(48, 10), 19);
        assert_eq!(center_offset(36, 17), 9);
    }

    #[test]
    fn letterbox_pads_with_transparency() {
        let scaler = Scaler::from_rgba(RgbaImage::from_pixel(10, 10, Rgba([200, 10, 10, 255])));
        let canvas = scaler.letterbox(24);
        assert_eq!(canvas.dimensions(), (24, 24));
        for (x, y, pixel) in canvas.enumerate_pixels() {
            let inside = (7..17).contains(&x) && (7..17).contains(&y);
            if inside {
                assert_eq!(*pixel, Rgba([200, 10, 10, 255]));
            } else {
                assert_eq!(pixel[3], 0, "({x}, {y}) should be transparent");
            }
        }
    }

    #[test]
    fn letterbox_wide_source() {
        let scaler = Scaler::from_rgba(RgbaImage::from_pixel(200, 100, Rgba([0, 0, 255, 255])));
        let canvas = scaler.letterbox(36);
        assert_eq!(canvas.dimensions(), (36, 36));
        // 36x18 thumbnail at y = 9
        assert_eq!(canvas.get_pixel(18, 8)[3], 0);
        assert_ne!(canvas.get_pixel(18, 9)[3], 0);
        assert_ne!(canvas.get_pixel(18, 26)[3], 0);
        assert_eq!(canvas.get_pixel(18, 27)[3], 0);
    }

    #[test]
    fn hidden_color_is_cleared() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 0]));
        img.put_pixel(1, 0, Rgba([220, 30, 30, 255]));
        let canvas = Scaler::from_rgba(img).letterbox(2);
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*canvas.get_pixel(1, 0), Rgba([220, 30, 30, 255]));
    }

    #[test]
    fn premultiplied_roundtrip() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 128]));
        premultiply(&mut img);
        assert_eq!(*img.get_pixel(0, 0), Rgba([100, 50, 25, 128]));
        unpremultiply(&mut img);
        assert_eq!(*img.get_pixel(0, 0), Rgba([199, 100, 50, 128]));
    }

    #[test]
    fn downscale_has_no_halo() {
        // red icon on a hidden white background
        let img = RgbaImage::from_fn(64, 64, |x, _| {
            if x < 32 {
                Rgba([255, 255, 255, 0])
            } else {
                Rgba([220, 30, 30, 255])
            }
        });
        let canvas = Scaler::from_rgba(img).letterbox(24);
        for pixel in canvas.pixels() {
            if pixel[3] != 0 {
                assert!(pixel[1] < 100 && pixel[2] < 100, "halo pixel {pixel:?}");
            }
        }
    }

    #[test]
    fn render_enhances_color_only() {
        let scaler = Scaler::from_rgba(RgbaImage::from_pixel(4, 4, Rgba([100, 100, 100, 128])));
        let icon = scaler.render(4);
        // uniform image: contrast is a no-op, brightness gives 120
        for pixel in icon.pixels() {
            assert_eq!(*pixel, Rgba([120, 120, 120, 128]));
        }
    }

    #[test]
    fn write_png_roundtrips_dimensions() -> Result<()> {
        let scaler = Scaler::from_rgba(RgbaImage::from_pixel(64, 32, Rgba([1, 2, 3, 255])));
        let mut buf = vec![];
        scaler.write(&mut buf, 48)?;
        let decoded = image::load_from_memory(&buf)?;
        assert_eq!((decoded.width(), decoded.height()), (48, 48));
        Ok(())
    }
}
