//! Session configuration.
//!
//! Every field has a default, so a caller can supply a partial JSON object
//! (or nothing at all) and get the behavior of the classic desktop tool:
//! extracting crops, a 0.1-2.0 resize range with Lanczos3 resampling and
//! 400x600 previews.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;

/// Errors produced while parsing or validating a [`SessionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("Invalid config JSON: {0}")]
    Parse(String),

    /// The resize range is empty, inverted or not positive.
    #[error("Invalid scale range: min ({min}) must be positive and not above max ({max})")]
    InvalidScaleRange { min: f64, max: f64 },

    /// A size field has a zero side.
    #[error("Invalid {field}: {width}x{height}")]
    ZeroSize {
        field: &'static str,
        width: u32,
        height: u32,
    },
}

/// What a committed selection does to the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropMode {
    /// Keep only the selected rectangle.
    #[default]
    Extract,
    /// Keep the canvas, zeroing the selected rectangle.
    Inverse,
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn is_zero(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Tunables for a [`crate::CropSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Extract or inverse crop.
    pub crop_mode: CropMode,
    /// Scale the decoded image to exactly this size on load.
    pub load_size: Option<Size>,
    /// Lower bound of the resize factor.
    pub min_scale: f64,
    /// Upper bound of the resize factor.
    pub max_scale: f64,
    /// Filter used when resizing the crop.
    pub resize_filter: FilterType,
    /// Box the original and result previews are fitted into.
    pub preview_size: Size,
    /// Maximum undo depth (`None` = unbounded).
    pub history_limit: Option<usize>,
    /// JPEG quality used on save (1-100).
    pub jpeg_quality: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            crop_mode: CropMode::Extract,
            load_size: None,
            min_scale: 0.1,
            max_scale: 2.0,
            resize_filter: FilterType::Lanczos3,
            preview_size: Size::new(400, 600),
            history_limit: Some(50),
            jpeg_quality: 90,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the session relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_scale, self.max_scale);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidScaleRange { min, max });
        }

        if self.preview_size.is_zero() {
            return Err(ConfigError::ZeroSize {
                field: "preview_size",
                width: self.preview_size.width,
                height: self.preview_size.height,
            });
        }

        if let Some(size) = self.load_size.filter(Size::is_zero) {
            return Err(ConfigError::ZeroSize {
                field: "load_size",
                width: size.width,
                height: size.height,
            });
        }

        Ok(())
    }

    /// Clamp a requested resize factor into the configured range.
    ///
    /// Returns `None` for non-finite input, and for any input when the
    /// configured range itself is unusable (see [`validate`](Self::validate)).
    pub fn clamp_scale(&self, factor: f64) -> Option<f64> {
        let (min, max) = (self.min_scale, self.max_scale);
        if !(factor.is_finite() && min.is_finite() && max.is_finite() && min <= max) {
            return None;
        }
        Some(factor.clamp(min, max))
    }
}
