use image::{imageops, imageops::FilterType, GrayImage};
use log::debug;

use crate::error::Error;

/// Resample `canvas` to exactly `target_width` pixels wide.
///
/// The height follows the aspect ratio (rounded, at least one row). Lanczos3
/// keeps thin strokes from aliasing before binarization. A canvas that is
/// already the right width is returned untouched.
pub fn normalize(canvas: GrayImage, target_width: u32) -> Result<GrayImage, Error> {
    if target_width == 0 {
        return Err(Error::InvalidTargetWidth(target_width));
    }
    let (width, height) = canvas.dimensions();
    if width == target_width {
        return Ok(canvas);
    }
    if width == 0 || height == 0 {
        return Err(Error::InvalidConfig(format!(
            "can not resample an empty {}x{} canvas",
            width, height
        )));
    }

    let scale = target_width as f64 / width as f64;
    let new_height = ((height as f64 * scale).round() as u32).max(1);
    debug!(
        "Resampling {}x{} -> {}x{}",
        width, height, target_width, new_height
    );
    Ok(imageops::resize(
        &canvas,
        target_width,
        new_height,
        FilterType::Lanczos3,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn same_width_passes_through() {
        let canvas = GrayImage::from_fn(10, 4, |x, y| Luma([(x * 10 + y) as u8]));
        let out = normalize(canvas.clone(), 10).unwrap();
        assert_eq!(out, canvas);
    }

    #[test]
    fn downscale_keeps_aspect() {
        let canvas = GrayImage::from_pixel(200, 30, Luma([255]));
        let out = normalize(canvas, 50).unwrap();
        assert_eq!(out.dimensions(), (50, 8));
    }

    #[test]
    fn upscale_keeps_aspect() {
        let canvas = GrayImage::from_pixel(100, 33, Luma([255]));
        let out = normalize(canvas, 384).unwrap();
        assert_eq!(out.dimensions(), (384, 127));
    }

    #[test]
    fn very_flat_canvas_keeps_one_row() {
        let canvas = GrayImage::from_pixel(1000, 1, Luma([0]));
        let out = normalize(canvas, 10).unwrap();
        assert_eq!(out.dimensions(), (10, 1));
    }

    #[test]
    fn zero_width_is_rejected() {
        let canvas = GrayImage::from_pixel(10, 10, Luma([255]));
        assert!(matches!(
            normalize(canvas, 0),
            Err(Error::InvalidTargetWidth(0))
        ));
    }
}
