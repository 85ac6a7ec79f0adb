//! Preview rendering for the "original" and "result" panes.

use log::warn;

use crate::config::Size;
use crate::decode::{resize_to_fit, FilterType, RasterImage};

/// Downscaled copies of the source and working images for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Previews {
    pub original: Option<RasterImage>,
    pub result: Option<RasterImage>,
}

impl Previews {
    /// Render both panes into a `size` box.
    pub fn render(source: Option<&RasterImage>, working: Option<&RasterImage>, size: Size) -> Self {
        Self {
            original: source.and_then(|img| render_preview(img, size)),
            result: working.and_then(|img| render_preview(img, size)),
        }
    }

    pub fn clear(&mut self) {
        self.original = None;
        self.result = None;
    }
}

/// Fit `image` into `size` with bilinear filtering, never upscaling.
///
/// A preview that cannot be produced is logged and left blank rather than
/// failing the operation that triggered it.
pub fn render_preview(image: &RasterImage, size: Size) -> Option<RasterImage> {
    if image.is_empty() {
        return None;
    }
    match resize_to_fit(image, size.width, size.height, FilterType::Bilinear) {
        Ok(preview) => Some(preview),
        Err(e) => {
            warn!("preview render failed for {}x{} image: {e}", image.width, image.height);
            None
        }
    }
}
