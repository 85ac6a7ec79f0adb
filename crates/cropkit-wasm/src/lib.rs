//! Cropkit WASM - WebAssembly bindings for cropkit
//!
//! This crate exposes the cropkit-core crop session to JavaScript/TypeScript
//! front ends.
//!
//! # Module Structure
//!
//! - `session` - `JsCropSession`, one per editor
//! - `types` - WASM-compatible wrapper types for images and outcomes
//! - `logging` - Browser console backend for the `log` facade
//!
//! # Usage
//!
//! ```typescript
//! import init, { init_logging, JsCropSession } from '@cropkit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! init_logging('info');
//!
//! const session = new JsCropSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//! const preview = session.original_preview();
//! console.log(`Preview ${preview.width}x${preview.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod logging;
mod session;
mod types;

// Re-export public types
pub use logging::init_logging;
pub use session::JsCropSession;
pub use types::{JsOutcome, JsRasterImage};

/// Initialize the WASM module (called automatically on load).
///
/// Warnings and errors go to the console by default; `init_logging` can
/// raise or lower the level afterwards.
#[wasm_bindgen(start)]
pub fn init() {
    init_logging("warn");
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
