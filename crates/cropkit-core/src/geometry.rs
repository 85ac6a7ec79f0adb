//! Display-space to image-space coordinate mapping.
//!
//! Pointer events arrive in the coordinates of whatever widget shows the
//! image (the viewport). A display coordinate maps to an image pixel with
//!
//! ```text
//! image_coord = display_coord * image_dimension / viewport_dimension
//! ```
//!
//! truncated toward zero and clamped into `0..=image_dimension`.

use serde::{Deserialize, Serialize};

use crate::transform::PixelRect;

/// A pointer position in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the widget the image is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A viewport is usable when both sides are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Map one display coordinate to an image pixel coordinate.
///
/// Returns `None` for an unusable viewport.
pub fn display_to_image(
    point: Point,
    viewport: Viewport,
    image_width: u32,
    image_height: u32,
) -> Option<(u32, u32)> {
    if !viewport.is_valid() {
        return None;
    }

    let map = |coord: f64, image_dim: u32, view_dim: f64| -> u32 {
        let scaled = (coord * image_dim as f64 / view_dim).trunc();
        // NaN collapses to 0 through max()
        scaled.max(0.0).min(image_dim as f64) as u32
    };

    Some((
        map(point.x, image_width, viewport.width),
        map(point.y, image_height, viewport.height),
    ))
}

/// Map a dragged rectangle to an image-space crop rectangle.
///
/// The corners may be given in any order. Returns `None` if the viewport is
/// unusable or the mapped rectangle has zero area after clamping.
pub fn map_selection(
    a: Point,
    b: Point,
    viewport: Viewport,
    image_width: u32,
    image_height: u32,
) -> Option<PixelRect> {
    let min = Point::new(a.x.min(b.x), a.y.min(b.y));
    let max = Point::new(a.x.max(b.x), a.y.max(b.y));

    let start = display_to_image(min, viewport, image_width, image_height)?;
    let end = display_to_image(max, viewport, image_width, image_height)?;

    let rect = PixelRect::from_corners(start, end);
    (!rect.is_empty()).then_some(rect)
}
