//! Image cropping operations.
//!
//! Crop regions are expressed in image pixels with an exclusive right/bottom
//! edge. Two modes exist:
//!
//! - **Extract**: keep only the rectangle ([`apply_crop`])
//! - **Inverse**: keep everything but the rectangle, whose interior is
//!   zeroed ([`apply_inverse_crop`])
//!
//! # Example
//!
//! ```ignore
//! let rect = PixelRect::from_corners((100, 100), (300, 300));
//! let cropped = apply_crop(&image, rect);
//! assert_eq!(cropped.dimensions(), (200, 200));
//! ```

use serde::{Deserialize, Serialize};

use crate::decode::RasterImage;

/// An axis-aligned rectangle in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from two opposite corners given in any order.
    ///
    /// The corners are normalized so the origin is the minimum corner; the
    /// maximum corner is exclusive.
    pub fn from_corners(a: (u32, u32), b: (u32, u32)) -> Self {
        let (x0, x1) = (a.0.min(b.0), a.0.max(b.0));
        let (y0, y1) = (a.1.min(b.1), a.1.max(b.1));
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersect with a `width x height` image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let x0 = self.x.min(width);
        let y0 = self.y.min(height);
        let x1 = self.right().min(width);
        let y1 = self.bottom().min(height);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }
}

/// Extract the pixels inside `rect`.
///
/// The rectangle is clamped to the image bounds first. An empty intersection
/// yields an empty (0x0) image; callers are expected to reject zero-area
/// selections before cropping.
pub fn apply_crop(image: &RasterImage, rect: PixelRect) -> RasterImage {
    let rect = rect.clamp_to(image.width, image.height);
    if rect.is_empty() {
        return RasterImage::new(0, 0, Vec::new());
    }

    // Fast path: full crop returns a clone
    if rect.x == 0 && rect.y == 0 && rect.width == image.width && rect.height == image.height {
        return image.clone();
    }

    let stride = image.width as usize * RasterImage::CHANNELS;
    let row_len = rect.width as usize * RasterImage::CHANNELS;
    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    // Copy pixel data row by row
    for src_y in rect.y..rect.bottom() {
        let start = src_y as usize * stride + rect.x as usize * RasterImage::CHANNELS;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    RasterImage::new(rect.width, rect.height, output)
}

/// Zero the pixels inside `rect`, keeping the exterior and the canvas size.
pub fn apply_inverse_crop(image: &RasterImage, rect: PixelRect) -> RasterImage {
    let rect = rect.clamp_to(image.width, image.height);
    let mut output = image.clone();
    if rect.is_empty() {
        return output;
    }

    let stride = image.width as usize * RasterImage::CHANNELS;
    let row_len = rect.width as usize * RasterImage::CHANNELS;

    for y in rect.y..rect.bottom() {
        let start = y as usize * stride + rect.x as usize * RasterImage::CHANNELS;
        output.pixels[start..start + row_len].fill(0);
    }

    output
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    /// Corner pairs inside a 64x64 image.
    fn corners_strategy() -> impl Strategy<Value = ((u32, u32), (u32, u32))> {
        ((0u32..=64, 0u32..=64), (0u32..=64, 0u32..=64))
    }

    proptest! {
        /// Swapping the corners never changes the crop.
        #[test]
        fn prop_corner_order_irrelevant((a, b) in corners_strategy()) {
            let img = create_test_image(64, 64);
            let forward = apply_crop(&img, PixelRect::from_corners(a, b));
            let backward = apply_crop(&img, PixelRect::from_corners(b, a));

            prop_assert_eq!(forward, backward);
        }

        /// Output matches the clamped rectangle and the buffer length.
        #[test]
        fn prop_output_matches_rect(
            (width, height) in (1u32..=50, 1u32..=50),
            (a, b) in corners_strategy(),
        ) {
            let img = create_test_image(width, height);
            let rect = PixelRect::from_corners(a, b).clamp_to(width, height);
            let result = apply_crop(&img, rect);

            if rect.is_empty() {
                prop_assert!(result.is_empty());
            } else {
                prop_assert_eq!(result.dimensions(), (rect.width, rect.height));
                prop_assert_eq!(result.pixels.len(), (rect.width * rect.height * 3) as usize);
                prop_assert_eq!(result.pixel(0, 0), img.pixel(rect.x, rect.y));
            }
        }

        /// Inverse crop keeps the canvas and every pixel outside the rect.
        #[test]
        fn prop_inverse_keeps_exterior(
            (a, b) in corners_strategy(),
            (px, py) in (0u32..32, 0u32..32),
        ) {
            let img = create_test_image(32, 32);
            let rect = PixelRect::from_corners(a, b);
            let result = apply_inverse_crop(&img, rect);

            prop_assert_eq!(result.dimensions(), img.dimensions());
            let inside = px >= rect.x && px < rect.right() && py >= rect.y && py < rect.bottom();
            if inside {
                prop_assert_eq!(result.pixel(px, py), Some([0, 0, 0]));
            } else {
                prop_assert_eq!(result.pixel(px, py), img.pixel(px, py));
            }
        }
    }
}
