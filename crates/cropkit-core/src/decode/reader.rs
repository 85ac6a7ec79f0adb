//! Raster decoding from bytes or files, with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};
use log::debug;

use super::{DecodeError, Orientation, RasterImage};

/// Decode an encoded image (PNG, JPEG, BMP or TIFF) from bytes.
///
/// The format is sniffed from the content, not from any file name. When the
/// container carries an EXIF orientation tag it is applied so the result is
/// upright. Alpha channels are dropped; the result is always RGB8.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a supported
/// image format, and `DecodeError::CorruptedFile` if decoding fails midway.
pub fn decode_bytes(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode().map_err(map_image_error)?;
    if img.color().has_alpha() {
        debug!("dropping alpha channel of {:?} image", img.color());
    }
    let oriented = apply_orientation(img, orientation);

    Ok(RasterImage::from_rgb_image(oriented.into_rgb8()))
}

/// Read a file from disk and decode it with [`decode_bytes`].
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be read, otherwise the same
/// errors as [`decode_bytes`].
pub fn decode_file(path: impl AsRef<Path>) -> Result<RasterImage, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| DecodeError::Io(format!("{}: {e}", path.display())))?;
    decode_bytes(&bytes)
}

/// Extract EXIF orientation value from encoded bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        ImageError::IoError(e) => DecodeError::Io(e.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

/// Returns `Orientation::Normal` if no EXIF data is found or the tag cannot
/// be read.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    /// Encode a small two-pixel image (red, green) in the given format.
    fn encoded(format: ImageFormat) -> Vec<u8> {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(rgb).write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let img = decode_bytes(&encoded(ImageFormat::Png)).unwrap();

        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(img.pixel(1, 0), Some([0, 255, 0]));
    }

    #[test]
    fn test_decode_bmp_and_tiff() {
        for format in [ImageFormat::Bmp, ImageFormat::Tiff] {
            let img = decode_bytes(&encoded(format)).unwrap();
            assert_eq!(img.dimensions(), (2, 1), "format {:?}", format);
            assert_eq!(img.pixel(1, 0), Some([0, 255, 0]));
        }
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        // JPEG is lossy, only check the shape
        let img = decode_bytes(&encoded(ImageFormat::Jpeg)).unwrap();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.byte_size(), 6);
    }

    /// JPEG of a `width x height` image carrying an EXIF APP1 segment with
    /// the given Orientation tag.
    fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 40) as u8, (y * 40) as u8, 128]);
            }
        }
        let rgb = image::RgbImage::from_raw(width, height, pixels).unwrap();
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut out, ImageFormat::Jpeg)
            .unwrap();
        let jpeg = out.into_inner();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        // Big-endian TIFF header, one IFD0 entry: Orientation (0x0112), SHORT
        let mut tiff = vec![b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08];
        tiff.extend_from_slice(&[0x00, 0x01]);
        tiff.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0x00, 0x00]);
        tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let mut payload = b"Exif\0\0".to_vec();
        payload.extend_from_slice(&tiff);
        let segment_len = (payload.len() + 2) as u16;

        let mut result = jpeg[0..2].to_vec();
        result.extend_from_slice(&[0xFF, 0xE1]);
        result.extend_from_slice(&segment_len.to_be_bytes());
        result.extend_from_slice(&payload);
        result.extend_from_slice(&jpeg[2..]);
        result
    }

    #[test]
    fn test_exif_orientation_read_from_jpeg() {
        assert_eq!(get_orientation(&jpeg_with_orientation(4, 2, 6)), Orientation::Rotate90CW);
        assert_eq!(get_orientation(&jpeg_with_orientation(4, 2, 3)), Orientation::Rotate180);
        assert_eq!(get_orientation(&jpeg_with_orientation(4, 2, 1)), Orientation::Normal);
    }

    #[test]
    fn test_decode_applies_exif_rotation() {
        let img = decode_bytes(&jpeg_with_orientation(4, 2, 6)).unwrap();
        assert_eq!(img.dimensions(), (2, 4));
        assert_eq!(img.byte_size(), 2 * 4 * 3);

        // 180 keeps the shape
        let img = decode_bytes(&jpeg_with_orientation(4, 2, 3)).unwrap();
        assert_eq!(img.dimensions(), (4, 2));
    }

    #[test]
    fn test_decode_rgba_drops_alpha() {
        let rgba = image::RgbaImage::from_raw(1, 1, vec![10, 20, 30, 40]).unwrap();
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(rgba)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();

        let img = decode_bytes(&out.into_inner()).unwrap();
        assert_eq!(img.pixels, vec![10, 20, 30]);
    }

    #[test]
    fn test_decode_unrecognized_bytes() {
        let result = decode_bytes(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_bytes(&[]), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encoded(ImageFormat::Png);
        let result = decode_bytes(&bytes[..bytes.len() / 2]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = decode_file(dir.path().join("missing.png"));
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }

    #[test]
    fn test_decode_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.png");
        std::fs::write(&path, encoded(ImageFormat::Png)).unwrap();

        let img = decode_file(&path).unwrap();
        assert_eq!(img.dimensions(), (2, 1));
    }

    #[test]
    fn test_orientation_without_exif() {
        assert_eq!(get_orientation(&encoded(ImageFormat::Png)), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::Rotate90CW);

        assert_eq!(result.into_rgb8().dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::FlipHorizontal)
            .into_rgb8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
