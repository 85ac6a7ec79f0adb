//! Raster encoding for save/export.
//!
//! Output format is chosen from the destination file extension, the way a
//! "Save As" dialog implies it. JPEG quality is configurable; the other
//! formats are lossless.

use std::io::Cursor;
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::RasterImage;

/// Errors that can occur while encoding or writing an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The requested output format is not supported.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// The destination could not be written
    #[error("I/O error: {0}")]
    Io(String),
}

/// Raster formats the session can save to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl OutputFormat {
    /// Infer the format from a file extension (without the dot).
    ///
    /// Matching is case-insensitive; `jpg`/`jpeg` and `tif`/`tiff` are
    /// accepted.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "bmp" => Some(OutputFormat::Bmp),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            _ => None,
        }
    }

    /// Infer the format from a path's extension.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnsupportedFormat` when the path has no extension
    /// or an unknown one.
    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| EncodeError::UnsupportedFormat(path.display().to_string()))?;

        Self::from_extension(ext).ok_or_else(|| EncodeError::UnsupportedFormat(ext.to_string()))
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tiff => "tiff",
        }
    }
}

/// Encode an image to bytes in the given format.
///
/// # Arguments
///
/// * `image` - RGB8 image to encode
/// * `format` - Output container
/// * `jpeg_quality` - JPEG quality (1-100); ignored by lossless formats
///
/// # Errors
///
/// Returns an error if the image dimensions are zero, the pixel buffer does
/// not match the dimensions, or the encoder fails.
pub fn encode(
    image: &RasterImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = width as usize * height as usize * RasterImage::CHANNELS;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let pixels = image.pixels.as_slice();
    let color = ExtendedColorType::Rgb8;

    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut buffer).write_image(pixels, width, height, color),
        OutputFormat::Jpeg => JpegEncoder::new_with_quality(&mut buffer, jpeg_quality.clamp(1, 100))
            .write_image(pixels, width, height, color),
        OutputFormat::Bmp => BmpEncoder::new(&mut buffer).write_image(pixels, width, height, color),
        OutputFormat::Tiff => TiffEncoder::new(&mut buffer).write_image(pixels, width, height, color),
    };
    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode an image and write it to `path`, format implied by the extension.
///
/// Nothing is written when the format is unsupported or encoding fails.
pub fn encode_to_path(
    image: &RasterImage,
    path: impl AsRef<Path>,
    jpeg_quality: u8,
) -> Result<OutputFormat, EncodeError> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path)?;
    let bytes = encode(image, format, jpeg_quality)?;

    std::fs::write(path, bytes).map_err(|e| EncodeError::Io(format!("{}: {e}", path.display())))?;
    Ok(format)
}
