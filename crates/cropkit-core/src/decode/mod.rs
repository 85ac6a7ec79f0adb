//! Image decoding and resampling.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG, BMP and TIFF files into RGB8 rasters
//! - Applying EXIF orientation on decode
//! - Resizing for previews and for the resize control
//!
//! All operations are synchronous and run on the caller's thread.
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::decode::decode_file;
//!
//! let image = decode_file("photo.png")?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_bytes, decode_file, get_orientation};
pub use resize::{resize, resize_to_fit, scale_by, scaled_dimensions};
pub use types::{DecodeError, FilterType, Orientation, RasterImage};
