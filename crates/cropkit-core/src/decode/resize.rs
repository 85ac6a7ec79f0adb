//! Image resizing functions for previews and the resize slider.
//!
//! Provides various resize operations using the `image` crate's algorithms.
//! All functions return new `RasterImage` instances without modifying the input.

use super::{DecodeError, FilterType, RasterImage};

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero,
/// and `DecodeError::CorruptedFile` if the source buffer does not match its
/// dimensions.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgb_image(resized))
}

/// Resize an image so it fits inside a `max_width x max_height` box.
///
/// The aspect ratio is preserved. Images that already fit are returned
/// unchanged (never upscaled).
pub fn resize_to_fit(
    image: &RasterImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<RasterImage, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_width,
            height: max_height,
        });
    }

    if image.width <= max_width && image.height <= max_height {
        return Ok(image.clone());
    }

    let (new_width, new_height) =
        calculate_fit_dimensions(image.width, image.height, max_width, max_height);

    resize(image, new_width, new_height, filter)
}

/// Scale an image by a uniform factor.
///
/// Output dimensions are `(round(w * factor), round(h * factor))`, each at
/// least 1 pixel.
pub fn scale_by(
    image: &RasterImage,
    factor: f64,
    filter: FilterType,
) -> Result<RasterImage, DecodeError> {
    let (width, height) = scaled_dimensions(image.width, image.height, factor);
    resize(image, width, height, filter)
}

/// Dimensions produced by [`scale_by`].
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let scale = |v: u32| ((v as f64 * factor).round().max(1.0)) as u32;
    (scale(width), scale(height))
}

/// Calculate dimensions to fit within the box while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let new_width = (width as f64 * ratio).round() as u32;
    let new_height = (height as f64 * ratio).round() as u32;

    (new_width.clamp(1, max_width), new_height.clamp(1, max_height))
}
