//! Lossless rotation by multiples of 90 degrees.
//!
//! Quarter turns are pure pixel permutations, so no interpolation is
//! involved and rotating forth and back restores the exact buffer. The
//! canvas always "expands" to fit: width and height swap for odd turns.
//!
//! # Direction
//!
//! Angles follow the usual image-library convention: positive degrees rotate
//! counter-clockwise, negative degrees rotate clockwise.
//!
//! For a source pixel `(x, y)` in a `w x h` image the destination is:
//! ```text
//! CounterClockwise: (y, w - 1 - x)
//! Half:             (w - 1 - x, h - 1 - y)
//! Clockwise:        (h - 1 - y, x)
//! ```

use serde::{Deserialize, Serialize};

use crate::decode::RasterImage;

/// A rotation by a whole number of quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuarterTurn {
    #[default]
    Identity,
    /// +90 degrees.
    CounterClockwise,
    /// 180 degrees.
    Half,
    /// -90 degrees.
    Clockwise,
}

impl QuarterTurn {
    /// Convert an angle in degrees (positive = counter-clockwise).
    ///
    /// Returns `None` if the angle is not a multiple of 90. Any multiple,
    /// including values beyond a full turn, is normalized.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Some(match degrees.rem_euclid(360) / 90 {
            0 => QuarterTurn::Identity,
            1 => QuarterTurn::CounterClockwise,
            2 => QuarterTurn::Half,
            _ => QuarterTurn::Clockwise,
        })
    }

    /// Angle in degrees in `0..360`, counter-clockwise.
    pub fn degrees(self) -> i32 {
        match self {
            QuarterTurn::Identity => 0,
            QuarterTurn::CounterClockwise => 90,
            QuarterTurn::Half => 180,
            QuarterTurn::Clockwise => 270,
        }
    }

    /// The turn that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            QuarterTurn::CounterClockwise => QuarterTurn::Clockwise,
            QuarterTurn::Clockwise => QuarterTurn::CounterClockwise,
            other => other,
        }
    }

    pub fn swaps_dimensions(self) -> bool {
        matches!(self, QuarterTurn::CounterClockwise | QuarterTurn::Clockwise)
    }
}

/// Dimensions of a `width x height` image after `turn`.
pub fn rotated_dimensions(width: u32, height: u32, turn: QuarterTurn) -> (u32, u32) {
    if turn.swaps_dimensions() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Rotate an image by a quarter turn.
///
/// The output canvas is sized to hold the whole rotated image, so no
/// corners are cut and no background fill is introduced.
pub fn apply_quarter_turn(image: &RasterImage, turn: QuarterTurn) -> RasterImage {
    if turn == QuarterTurn::Identity {
        return image.clone();
    }

    let (w, h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = rotated_dimensions(image.width, image.height, turn);
    let channels = RasterImage::CHANNELS;
    let mut output = vec![0u8; image.pixels.len()];

    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = match turn {
                QuarterTurn::CounterClockwise => (y, w - 1 - x),
                QuarterTurn::Half => (w - 1 - x, h - 1 - y),
                QuarterTurn::Clockwise => (h - 1 - y, x),
                QuarterTurn::Identity => (x, y),
            };

            let src_idx = (y * w + x) * channels;
            let dst_idx = (dy * dst_w as usize + dx) * channels;
            output[dst_idx..dst_idx + channels]
                .copy_from_slice(&image.pixels[src_idx..src_idx + channels]);
        }
    }

    RasterImage::new(dst_w, dst_h, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];

    /// Red on the left, green on the right.
    fn pair() -> RasterImage {
        RasterImage::new(2, 1, [RED, GREEN].concat())
    }

    #[test]
    fn test_from_degrees() {
        assert_eq!(QuarterTurn::from_degrees(0), Some(QuarterTurn::Identity));
        assert_eq!(QuarterTurn::from_degrees(90), Some(QuarterTurn::CounterClockwise));
        assert_eq!(QuarterTurn::from_degrees(-90), Some(QuarterTurn::Clockwise));
        assert_eq!(QuarterTurn::from_degrees(180), Some(QuarterTurn::Half));
        assert_eq!(QuarterTurn::from_degrees(-180), Some(QuarterTurn::Half));
        assert_eq!(QuarterTurn::from_degrees(450), Some(QuarterTurn::CounterClockwise));
        assert_eq!(QuarterTurn::from_degrees(360), Some(QuarterTurn::Identity));
        assert_eq!(QuarterTurn::from_degrees(45), None);
    }

    #[test]
    fn test_inverse() {
        assert_eq!(QuarterTurn::Clockwise.inverse(), QuarterTurn::CounterClockwise);
        assert_eq!(QuarterTurn::Half.inverse(), QuarterTurn::Half);
    }

    #[test]
    fn test_rotated_dimensions() {
        assert_eq!(rotated_dimensions(100, 50, QuarterTurn::Clockwise), (50, 100));
        assert_eq!(rotated_dimensions(100, 50, QuarterTurn::Half), (100, 50));
    }

    #[test]
    fn test_clockwise_moves_left_to_top() {
        let result = apply_quarter_turn(&pair(), QuarterTurn::Clockwise);

        assert_eq!(result.dimensions(), (1, 2));
        assert_eq!(result.pixel(0, 0), Some(RED));
        assert_eq!(result.pixel(0, 1), Some(GREEN));
    }

    #[test]
    fn test_counter_clockwise_moves_left_to_bottom() {
        let result = apply_quarter_turn(&pair(), QuarterTurn::CounterClockwise);

        assert_eq!(result.dimensions(), (1, 2));
        assert_eq!(result.pixel(0, 0), Some(GREEN));
        assert_eq!(result.pixel(0, 1), Some(RED));
    }

    #[test]
    fn test_half_turn_reverses() {
        let result = apply_quarter_turn(&pair(), QuarterTurn::Half);

        assert_eq!(result.dimensions(), (2, 1));
        assert_eq!(result.pixel(0, 0), Some(GREEN));
        assert_eq!(result.pixel(1, 0), Some(RED));
    }

    #[test]
    fn test_identity_is_copy() {
        let img = pair();
        assert_eq!(apply_quarter_turn(&img, QuarterTurn::Identity), img);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = RasterImage> {
        (1u32..=24, 1u32..=24).prop_flat_map(|(w, h)| {
            proptest::collection::vec(any::<u8>(), (w * h * 3) as usize)
                .prop_map(move |pixels| RasterImage::new(w, h, pixels))
        })
    }

    fn turn_strategy() -> impl Strategy<Value = QuarterTurn> {
        prop_oneof![
            Just(QuarterTurn::Identity),
            Just(QuarterTurn::CounterClockwise),
            Just(QuarterTurn::Half),
            Just(QuarterTurn::Clockwise),
        ]
    }

    proptest! {
        /// A turn followed by its inverse restores the exact buffer.
        #[test]
        fn prop_inverse_restores(img in image_strategy(), turn in turn_strategy()) {
            let rotated = apply_quarter_turn(&img, turn);
            let restored = apply_quarter_turn(&rotated, turn.inverse());

            prop_assert_eq!(restored, img);
        }

        /// Four counter-clockwise turns are the identity.
        #[test]
        fn prop_four_turns_identity(img in image_strategy()) {
            let mut current = img.clone();
            for _ in 0..4 {
                current = apply_quarter_turn(&current, QuarterTurn::CounterClockwise);
            }
            prop_assert_eq!(current, img);
        }

        /// Output dimensions follow rotated_dimensions.
        #[test]
        fn prop_dimensions(img in image_strategy(), turn in turn_strategy()) {
            let rotated = apply_quarter_turn(&img, turn);
            prop_assert_eq!(rotated.dimensions(), rotated_dimensions(img.width, img.height, turn));
            prop_assert_eq!(rotated.byte_size(), img.byte_size());
        }
    }
}
