//! Cropkit Core - interactive crop session library
//!
//! This crate holds everything behind a "load, drag a rectangle, crop,
//! resize, rotate, undo, save" tool, with no dependency on any UI toolkit.
//! A front end forwards its pointer, slider and button events to a
//! [`CropSession`] and draws the [`Previews`] it produces.
//!
//! # Module Structure
//!
//! - `session` - The [`CropSession`] state machine and its [`Outcome`]s
//! - `config` - [`SessionConfig`] and its JSON loading
//! - `decode` - Decoding, the [`RasterImage`] buffer and resampling
//! - `encode` - Saving to PNG/JPEG/BMP/TIFF
//! - `transform` - Crop, inverse crop and quarter-turn rotation
//! - `geometry` - Display-to-image coordinate mapping
//! - `selection` - Drag rectangle tracking
//! - `history` - Undo/redo stacks
//! - `preview` - Preview rendering
//!
//! # Example
//!
//! ```ignore
//! use cropkit_core::{CropSession, Point, Viewport};
//!
//! let mut session = CropSession::default();
//! session.load("photo.png")?;
//! session.begin_drag(Point::new(50.0, 50.0));
//! session.end_drag(Point::new(150.0, 150.0), Viewport::new(400.0, 300.0));
//! session.resize(0.5);
//! session.save("crop.jpg")?;
//! ```

pub mod config;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod history;
pub mod preview;
pub mod selection;
pub mod session;
pub mod transform;

pub use config::{ConfigError, CropMode, SessionConfig, Size};
pub use decode::{DecodeError, FilterType, RasterImage};
pub use encode::{EncodeError, OutputFormat};
pub use geometry::{Point, Viewport};
pub use preview::Previews;
pub use session::{CropSession, IgnoreReason, Outcome};
pub use transform::{PixelRect, QuarterTurn};
