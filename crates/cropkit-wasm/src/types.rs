//! WASM-compatible wrapper types for session data.
//!
//! This module provides JavaScript-friendly types that wrap the core cropkit
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use cropkit_core::{Outcome, RasterImage};
use wasm_bindgen::prelude::*;

/// An RGB image handed to JavaScript (previews, working image).
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` and `rgba()` copy it
/// into a fresh `Uint8Array` on every call.
#[wasm_bindgen]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new JsRasterImage from dimensions and RGB pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the RGB buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns opaque RGBA pixel data, ready for `new ImageData(...)`.
    pub fn rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for px in self.pixels.chunks_exact(3) {
            out.extend_from_slice(px);
            out.push(255);
        }
        out
    }
}

impl JsRasterImage {
    pub(crate) fn from_raster(img: &RasterImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels.clone(),
        }
    }

    /// Convert back to a core RasterImage. Clones the pixel data.
    pub(crate) fn to_raster(&self) -> RasterImage {
        RasterImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Result of a session call, as seen from JavaScript.
///
/// `applied` is false when the call was ignored; `reason` then names why
/// (e.g. `"no_crop"`, `"nothing_to_undo"`).
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsOutcome {
    applied: bool,
    reason: Option<String>,
}

#[wasm_bindgen]
impl JsOutcome {
    #[wasm_bindgen(getter)]
    pub fn applied(&self) -> bool {
        self.applied
    }

    #[wasm_bindgen(getter)]
    pub fn reason(&self) -> Option<String> {
        self.reason.clone()
    }
}

impl From<Outcome> for JsOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Applied => JsOutcome {
                applied: true,
                reason: None,
            },
            Outcome::Ignored(reason) => JsOutcome {
                applied: false,
                reason: Some(reason.as_str().to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropkit_core::IgnoreReason;

    #[test]
    fn test_js_raster_image_creation() {
        let img = JsRasterImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_rgba_adds_opaque_alpha() {
        let img = JsRasterImage::new(2, 1, vec![255, 128, 64, 32, 16, 8]);
        assert_eq!(img.rgba(), vec![255, 128, 64, 255, 32, 16, 8, 255]);
    }

    #[test]
    fn test_raster_roundtrip() {
        let raster = RasterImage::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        let js_img = JsRasterImage::from_raster(&raster);

        assert_eq!(js_img.pixels(), raster.pixels);
        assert_eq!(js_img.to_raster(), raster);
    }

    #[test]
    fn test_outcome_conversion() {
        let applied = JsOutcome::from(Outcome::Applied);
        assert!(applied.applied());
        assert_eq!(applied.reason(), None);

        let ignored = JsOutcome::from(Outcome::Ignored(IgnoreReason::NothingToUndo));
        assert!(!ignored.applied());
        assert_eq!(ignored.reason().as_deref(), Some("nothing_to_undo"));
    }
}
