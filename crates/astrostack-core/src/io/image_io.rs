use std::path::Path;

use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage};

use crate::consts::CHANNELS;
use crate::error::{Result, StackError};
use crate::frame::PixelBuffer;

/// Decode an image file into an RGBA8 buffer.
///
/// Images wider than `max_width` are downsized with their aspect ratio kept.
pub fn load_frame(path: &Path, max_width: Option<u32>) -> Result<PixelBuffer> {
    let mut rgba = image::open(path)?.to_rgba8();

    if let Some(max_width) = max_width {
        let (w, h) = rgba.dimensions();
        if max_width > 0 && w > max_width {
            let scaled_h = ((h as f64 * max_width as f64 / w as f64).round() as u32).max(1);
            rgba = image::imageops::resize(&rgba, max_width, scaled_h, FilterType::Triangle);
        }
    }

    from_rgba_image(rgba)
}

pub fn from_rgba_image(img: RgbaImage) -> Result<PixelBuffer> {
    let (w, h) = img.dimensions();
    PixelBuffer::from_raw(w as usize, h as usize, img.into_raw())
}

pub fn to_rgba_image(frame: &PixelBuffer) -> Result<RgbaImage> {
    let (w, h) = image_dimensions(frame.width(), frame.height())?;
    let expected = w as usize * h as usize * CHANNELS;
    let actual = frame.samples().len();
    RgbaImage::from_raw(w, h, frame.samples().to_vec())
        .ok_or(StackError::InvalidBufferLength { expected, actual })
}

/// Image-crate dimensions for a buffer; both sides must fit in a `u32`.
pub fn image_dimensions(width: usize, height: usize) -> Result<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(StackError::InvalidDimensions { width, height }),
    }
}

/// Save a buffer as 8-bit RGBA PNG.
pub fn save_png(frame: &PixelBuffer, path: &Path) -> Result<()> {
    to_rgba_image(frame)?.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a buffer as 8-bit RGBA TIFF.
pub fn save_tiff(frame: &PixelBuffer, path: &Path) -> Result<()> {
    to_rgba_image(frame)?.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a buffer, choosing format from file extension (PNG by default).
pub fn save_image(frame: &PixelBuffer, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => save_tiff(frame, path),
        _ => save_png(frame, path),
    }
}
