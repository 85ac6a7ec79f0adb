//! Image encoding pipeline.
//!
//! This module provides functionality for:
//! - Picking an output format from a file extension
//! - Encoding RGB8 rasters to PNG, JPEG, BMP or TIFF
//! - Writing the encoded bytes to disk
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::encode::{encode, OutputFormat};
//!
//! let png = encode(&image, OutputFormat::Png, 90)?;
//! println!("Encoded {} bytes", png.len());
//! ```

mod writer;

pub use writer::{encode, encode_to_path, EncodeError, OutputFormat};
