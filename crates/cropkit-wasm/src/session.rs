//! WASM bindings for the crop session.
//!
//! A browser front end owns one `JsCropSession` per editor and forwards its
//! DOM events to it: `pointerdown`/`pointermove`/`pointerup` on the canvas,
//! the resize slider's `input` event and the toolbar buttons.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsCropSession({ crop_mode: 'extract' });
//! session.load(new Uint8Array(await file.arrayBuffer()));
//!
//! canvas.onpointerdown = (e) => session.begin_drag(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => session.update_drag(e.offsetX, e.offsetY);
//! canvas.onpointerup = (e) => {
//!   const outcome = session.end_drag(e.offsetX, e.offsetY, canvas.width, canvas.height);
//!   if (outcome.applied) draw(session.result_preview());
//! };
//!
//! const png = session.encode('png');
//! ```

use cropkit_core::{
    CropSession, DecodeError, EncodeError, OutputFormat, PixelRect, Point, SessionConfig,
    Viewport,
};
use wasm_bindgen::prelude::*;

use crate::types::{JsOutcome, JsRasterImage};

/// Convert any displayable error into a JavaScript `Error`.
fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// A crop session owned by JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session from a plain JS config object.
    ///
    /// `undefined` or `null` selects the defaults; missing fields take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Throws if the object does not match the config shape or fails
    /// validation (e.g. `min_scale > max_scale`).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsCropSession, JsValue> {
        let config: SessionConfig = if config.is_undefined() || config.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        config.validate().map_err(to_js_error)?;
        Ok(Self::with_config(config))
    }

    /// Create a session from a JSON string.
    pub fn from_json(json: &str) -> Result<JsCropSession, JsValue> {
        SessionConfig::from_json(json)
            .map(Self::with_config)
            .map_err(to_js_error)
    }

    /// The effective configuration as a JS object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config()).map_err(to_js_error)
    }

    /// Decode an encoded file (PNG, JPEG, BMP, TIFF) and load it.
    pub fn load(&mut self, bytes: &[u8]) -> Result<JsOutcome, JsValue> {
        self.load_bytes(bytes).map_err(to_js_error)
    }

    /// Load an already decoded RGB image.
    pub fn load_pixels(&mut self, image: &JsRasterImage) -> Result<JsOutcome, JsValue> {
        self.load_raster(image).map_err(to_js_error)
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) -> JsOutcome {
        self.inner.begin_drag(Point::new(x, y)).into()
    }

    pub fn update_drag(&mut self, x: f64, y: f64) -> JsOutcome {
        self.inner.update_drag(Point::new(x, y)).into()
    }

    /// Finish the drag and crop. `viewport_width`/`viewport_height` are the
    /// displayed size of the canvas the coordinates refer to.
    pub fn end_drag(
        &mut self,
        x: f64,
        y: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) -> JsOutcome {
        self.inner
            .end_drag(Point::new(x, y), Viewport::new(viewport_width, viewport_height))
            .into()
    }

    /// Crop to a rectangle given in source-image pixels.
    pub fn crop(&mut self, x: u32, y: u32, width: u32, height: u32) -> JsOutcome {
        self.inner.crop(PixelRect::new(x, y, width, height)).into()
    }

    /// Current drag rectangle as `[x0, y0, x1, y1]` in display coordinates.
    pub fn pending_selection(&self) -> Option<Vec<f64>> {
        self.inner
            .pending_selection()
            .map(|(a, b)| vec![a.x, a.y, b.x, b.y])
    }

    pub fn resize(&mut self, factor: f64) -> JsOutcome {
        self.inner.resize(factor).into()
    }

    /// Rotate by a multiple of 90 degrees (positive = counter-clockwise).
    pub fn rotate(&mut self, degrees: i32) -> JsOutcome {
        self.inner.rotate(degrees).into()
    }

    pub fn rotate_clockwise(&mut self) -> JsOutcome {
        self.inner.rotate_clockwise().into()
    }

    pub fn rotate_counter_clockwise(&mut self) -> JsOutcome {
        self.inner.rotate_counter_clockwise().into()
    }

    pub fn undo(&mut self) -> JsOutcome {
        self.inner.undo().into()
    }

    pub fn redo(&mut self) -> JsOutcome {
        self.inner.redo().into()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Encode the working image; the format comes from a file extension
    /// such as `"png"` or `"jpg"`. Returns `undefined` when nothing is
    /// loaded.
    pub fn encode(&self, extension: &str) -> Result<Option<Vec<u8>>, JsValue> {
        self.encode_as(extension).map_err(to_js_error)
    }

    pub fn working_image(&self) -> Option<JsRasterImage> {
        self.inner.working().map(JsRasterImage::from_raster)
    }

    pub fn original_preview(&self) -> Option<JsRasterImage> {
        self.inner
            .previews()
            .original
            .as_ref()
            .map(JsRasterImage::from_raster)
    }

    pub fn result_preview(&self) -> Option<JsRasterImage> {
        self.inner
            .previews()
            .result
            .as_ref()
            .map(JsRasterImage::from_raster)
    }
}

impl JsCropSession {
    pub(crate) fn with_config(config: SessionConfig) -> Self {
        Self {
            inner: CropSession::new(config),
        }
    }

    fn load_bytes(&mut self, bytes: &[u8]) -> Result<JsOutcome, DecodeError> {
        self.inner.load_bytes(bytes).map(JsOutcome::from)
    }

    fn load_raster(&mut self, image: &JsRasterImage) -> Result<JsOutcome, DecodeError> {
        self.inner.load_image(image.to_raster()).map(JsOutcome::from)
    }

    fn encode_as(&self, extension: &str) -> Result<Option<Vec<u8>>, EncodeError> {
        let format = OutputFormat::from_extension(extension)
            .ok_or_else(|| EncodeError::UnsupportedFormat(extension.to_string()))?;
        self.inner.encode(format)
    }
}


/// WASM-specific tests that require JsValue.
///
/// These run on wasm32 targets only (`wasm-pack test`).
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_with_undefined_config() {
        let session = JsCropSession::new(JsValue::UNDEFINED).unwrap();
        assert!(!session.can_undo());
        assert!(session.config().is_ok());
    }

    #[wasm_bindgen_test]
    fn test_from_json_rejects_bad_range() {
        let result = JsCropSession::from_json(r#"{"min_scale": 3.0, "max_scale": 1.0}"#);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_load_garbage_throws() {
        let mut session = JsCropSession::from_json("{}").unwrap();
        assert!(session.load(b"not an image").is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_unknown_extension_throws() {
        let mut session = JsCropSession::from_json("{}").unwrap();
        let image = JsRasterImage::new(4, 4, vec![0u8; 4 * 4 * 3]);
        session.load_pixels(&image).unwrap();
        assert!(session.encode("gif").is_err());
    }
}
