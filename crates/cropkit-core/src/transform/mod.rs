//! Image transformation operations: cropping and rotation.
//!
//! Every transform takes a borrowed image and returns a new one; inputs are
//! never modified.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in image pixels, origin top-left, exclusive
//!   right/bottom edge
//! - Rotation angles are in degrees, positive = counter-clockwise, and must
//!   be multiples of 90

mod crop;
mod rotation;

pub use crop::{apply_crop, apply_inverse_crop, PixelRect};
pub use rotation::{apply_quarter_turn, rotated_dimensions, QuarterTurn};
