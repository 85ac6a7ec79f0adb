//! The interactive crop session.
//!
//! A [`CropSession`] owns one loaded image and the result of the
//! crop/resize/rotate pipeline applied to it. Input layers translate their
//! events into plain method calls:
//!
//! | Event                  | Call |
//! |------------------------|------|
//! | open file              | [`CropSession::load`] / [`CropSession::load_bytes`] |
//! | pointer down/move/up   | [`CropSession::begin_drag`] / [`CropSession::update_drag`] / [`CropSession::end_drag`] |
//! | resize slider          | [`CropSession::resize`] |
//! | rotate buttons         | [`CropSession::rotate`] |
//! | undo / redo            | [`CropSession::undo`] / [`CropSession::redo`] |
//! | save                   | [`CropSession::save`] / [`CropSession::encode`] |
//!
//! Every call runs to completion before returning. Operations whose
//! preconditions are not met change nothing and report
//! [`Outcome::Ignored`]; only decoding and encoding can fail with an error.

use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{CropMode, SessionConfig};
use crate::decode::{self, DecodeError, RasterImage};
use crate::encode::{self, EncodeError, OutputFormat};
use crate::geometry::{map_selection, Point, Viewport};
use crate::history::History;
use crate::preview::Previews;
use crate::selection::DragTracker;
use crate::transform::{apply_crop, apply_inverse_crop, apply_quarter_turn, PixelRect, QuarterTurn};

/// Result of a session operation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    /// The operation ran and (for commits) was recorded in the history.
    Applied,
    /// Preconditions were not met; the session is unchanged.
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// Why an operation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// No image has been loaded.
    NoImage,
    /// No drag is in progress.
    NoSelection,
    /// The selection maps to a zero-area rectangle.
    EmptySelection,
    /// Resize needs a committed crop to scale from.
    NoCrop,
    /// The resize factor is not finite, or the configured range is unusable.
    InvalidScale,
    /// The angle is not a multiple of 90 degrees.
    UnsupportedAngle,
    /// The angle is a whole number of turns.
    NoRotation,
    NothingToUndo,
    NothingToRedo,
    /// The image library rejected the operation.
    ProcessingFailed,
}

impl IgnoreReason {
    /// Stable snake_case name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            IgnoreReason::NoImage => "no_image",
            IgnoreReason::NoSelection => "no_selection",
            IgnoreReason::EmptySelection => "empty_selection",
            IgnoreReason::NoCrop => "no_crop",
            IgnoreReason::InvalidScale => "invalid_scale",
            IgnoreReason::UnsupportedAngle => "unsupported_angle",
            IgnoreReason::NoRotation => "no_rotation",
            IgnoreReason::NothingToUndo => "nothing_to_undo",
            IgnoreReason::NothingToRedo => "nothing_to_redo",
            IgnoreReason::ProcessingFailed => "processing_failed",
        }
    }
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a history entry has to capture.
///
/// The source is never modified after decode, so entries share it; the
/// working image and crop base are owned copies.
#[derive(Debug, Clone)]
struct Pipeline {
    source: Arc<RasterImage>,
    working: RasterImage,
    crop_base: Option<RasterImage>,
}

/// Interactive crop session: one image, its edit pipeline and its history.
#[derive(Debug)]
pub struct CropSession {
    config: SessionConfig,
    state: Option<Pipeline>,
    history: History<Pipeline>,
    drag: DragTracker,
    previews: Previews,
}

impl Default for CropSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl CropSession {
    /// Create an empty session. The configuration is used as given; call
    /// [`SessionConfig::validate`] first when it comes from user input. An
    /// unusable scale range makes every resize report `invalid_scale`.
    pub fn new(config: SessionConfig) -> Self {
        let history = History::new(config.history_limit);
        Self {
            config,
            state: None,
            history,
            drag: DragTracker::new(),
            previews: Previews::default(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The loaded (and possibly load-scaled) image crops are taken from.
    pub fn source(&self) -> Option<&RasterImage> {
        self.state.as_ref().map(|s| s.source.as_ref())
    }

    /// The current pipeline result.
    pub fn working(&self) -> Option<&RasterImage> {
        self.state.as_ref().map(|s| &s.working)
    }

    /// The image produced by the last crop, which `resize` scales from.
    pub fn crop_base(&self) -> Option<&RasterImage> {
        self.state.as_ref().and_then(|s| s.crop_base.as_ref())
    }

    pub fn previews(&self) -> &Previews {
        &self.previews
    }

    /// Corners of the rectangle currently being dragged, in display space.
    pub fn pending_selection(&self) -> Option<(Point, Point)> {
        self.drag.rect()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    // ------------------------------------------------------------------
    // Loading and saving
    // ------------------------------------------------------------------

    /// Decode the file at `path` and make it the new source.
    ///
    /// # Errors
    ///
    /// Returns a `DecodeError` if the file cannot be read or is not a
    /// supported image. The session is left untouched in that case.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Outcome, DecodeError> {
        let path = path.as_ref();
        let image = decode::decode_file(path).inspect_err(|e| {
            warn!("load of {} failed: {e}", path.display());
        })?;
        info!("loaded {} ({}x{})", path.display(), image.width, image.height);
        self.load_image(image)
    }

    /// Decode an in-memory file and make it the new source.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Outcome, DecodeError> {
        let image = decode::decode_bytes(bytes).inspect_err(|e| {
            warn!("load of {} byte buffer failed: {e}", bytes.len());
        })?;
        info!("loaded {}x{} image from memory", image.width, image.height);
        self.load_image(image)
    }

    /// Make an already decoded image the new source.
    ///
    /// The previous state (if any) is pushed to the undo stack, the redo
    /// stack is cleared, and any pending selection or crop is dropped. With
    /// `load_size` configured the image is first scaled to that size.
    ///
    /// # Errors
    ///
    /// Images with a zero dimension, or whose buffer is not
    /// `width * height * 3` bytes, are rejected and the session is left
    /// untouched.
    pub fn load_image(&mut self, image: RasterImage) -> Result<Outcome, DecodeError> {
        if image.is_empty() {
            return Err(DecodeError::InvalidDimensions {
                width: image.width,
                height: image.height,
            });
        }
        if image.pixels.len() != image.expected_len() {
            warn!(
                "rejected {}x{} image with {} byte buffer",
                image.width,
                image.height,
                image.pixels.len()
            );
            return Err(DecodeError::InvalidPixelData {
                expected: image.expected_len(),
                actual: image.pixels.len(),
            });
        }

        let image = match self.config.load_size {
            Some(size) => decode::resize(&image, size.width, size.height, self.config.resize_filter)?,
            None => image,
        };

        self.drag.cancel();
        self.commit(Pipeline {
            source: Arc::new(image.clone()),
            working: image,
            crop_base: None,
        });
        Ok(Outcome::Applied)
    }

    /// Write the working image to `path`, format implied by the extension.
    ///
    /// # Errors
    ///
    /// Returns an `EncodeError` for an unsupported extension or an
    /// unwritable path. The session is never modified by saving.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<Outcome, EncodeError> {
        let path = path.as_ref();
        let Some(working) = self.working() else {
            debug!("save ignored: no image");
            return Ok(Outcome::Ignored(IgnoreReason::NoImage));
        };

        match encode::encode_to_path(working, path, self.config.jpeg_quality) {
            Ok(format) => {
                info!(
                    "saved {}x{} image to {} as {}",
                    working.width,
                    working.height,
                    path.display(),
                    format.extension()
                );
                Ok(Outcome::Applied)
            }
            Err(e) => {
                warn!("save to {} failed: {e}", path.display());
                Err(e)
            }
        }
    }

    /// Encode the working image in memory. `Ok(None)` when nothing is
    /// loaded.
    pub fn encode(&self, format: OutputFormat) -> Result<Option<Vec<u8>>, EncodeError> {
        self.working()
            .map(|working| encode::encode(working, format, self.config.jpeg_quality))
            .transpose()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Pointer down: start a new selection rectangle.
    pub fn begin_drag(&mut self, point: Point) -> Outcome {
        if self.state.is_none() {
            debug!("drag ignored: no image");
            return Outcome::Ignored(IgnoreReason::NoImage);
        }
        self.drag.begin(point);
        Outcome::Applied
    }

    /// Pointer move: update the free corner of the selection.
    pub fn update_drag(&mut self, point: Point) -> Outcome {
        if self.drag.update(point) {
            Outcome::Applied
        } else {
            Outcome::Ignored(IgnoreReason::NoSelection)
        }
    }

    /// Pointer up: map the rectangle into image space and commit the crop.
    ///
    /// `viewport` is the size of the widget the pointer coordinates refer
    /// to. The pending selection is cleared whether or not a crop results.
    pub fn end_drag(&mut self, point: Point, viewport: Viewport) -> Outcome {
        let Some((start, end)) = self.drag.finish(point) else {
            debug!("end of drag ignored: no drag in progress");
            return Outcome::Ignored(IgnoreReason::NoSelection);
        };
        let Some(source) = self.source() else {
            return Outcome::Ignored(IgnoreReason::NoImage);
        };

        match map_selection(start, end, viewport, source.width, source.height) {
            Some(rect) => self.crop(rect),
            None => {
                debug!("selection {:?}-{:?} on {:?} has no area", start, end, viewport);
                Outcome::Ignored(IgnoreReason::EmptySelection)
            }
        }
    }

    /// Commit a crop given directly in source-image pixels.
    ///
    /// The rectangle is clamped to the source. In [`CropMode::Extract`] the
    /// region becomes the working image; in [`CropMode::Inverse`] the
    /// working image is the source with the region zeroed.
    pub fn crop(&mut self, rect: PixelRect) -> Outcome {
        let Some(state) = &self.state else {
            return Outcome::Ignored(IgnoreReason::NoImage);
        };

        let rect = rect.clamp_to(state.source.width, state.source.height);
        if rect.is_empty() {
            return Outcome::Ignored(IgnoreReason::EmptySelection);
        }

        let cropped = match self.config.crop_mode {
            CropMode::Extract => apply_crop(&state.source, rect),
            CropMode::Inverse => apply_inverse_crop(&state.source, rect),
        };
        info!(
            "crop ({:?}) at {},{} size {}x{}",
            self.config.crop_mode, rect.x, rect.y, rect.width, rect.height
        );

        let next = Pipeline {
            source: Arc::clone(&state.source),
            working: cropped.clone(),
            crop_base: Some(cropped),
        };
        self.drag.cancel();
        self.commit(next);
        Outcome::Applied
    }

    // ------------------------------------------------------------------
    // Resize and rotate
    // ------------------------------------------------------------------

    /// Scale the last crop by `factor`, clamped to the configured range.
    ///
    /// The result is always computed from the crop itself, so repeated
    /// slider moves do not compound.
    pub fn resize(&mut self, factor: f64) -> Outcome {
        let Some(state) = &self.state else {
            return Outcome::Ignored(IgnoreReason::NoImage);
        };
        let Some(base) = &state.crop_base else {
            debug!("resize ignored: nothing cropped yet");
            return Outcome::Ignored(IgnoreReason::NoCrop);
        };
        let Some(scale) = self.config.clamp_scale(factor) else {
            debug!(
                "resize ignored: factor {factor} or range {}..={} unusable",
                self.config.min_scale, self.config.max_scale
            );
            return Outcome::Ignored(IgnoreReason::InvalidScale);
        };

        let resized = match decode::scale_by(base, scale, self.config.resize_filter) {
            Ok(resized) => resized,
            Err(e) => {
                warn!("resize by {scale} failed: {e}");
                return Outcome::Ignored(IgnoreReason::ProcessingFailed);
            }
        };
        info!(
            "resize {}x{} by {scale} to {}x{}",
            base.width, base.height, resized.width, resized.height
        );

        let next = Pipeline {
            source: Arc::clone(&state.source),
            working: resized,
            crop_base: Some(base.clone()),
        };
        self.commit(next);
        Outcome::Applied
    }

    /// Rotate the working image by `degrees` (positive = counter-clockwise).
    ///
    /// Only multiples of 90 are accepted. The canvas expands to fit, and the
    /// crop base is rotated too so a later resize keeps the orientation.
    pub fn rotate(&mut self, degrees: i32) -> Outcome {
        let Some(state) = &self.state else {
            return Outcome::Ignored(IgnoreReason::NoImage);
        };
        let turn = match QuarterTurn::from_degrees(degrees) {
            Some(QuarterTurn::Identity) => return Outcome::Ignored(IgnoreReason::NoRotation),
            Some(turn) => turn,
            None => {
                debug!("rotate ignored: {degrees} is not a multiple of 90");
                return Outcome::Ignored(IgnoreReason::UnsupportedAngle);
            }
        };

        let next = Pipeline {
            source: Arc::clone(&state.source),
            working: apply_quarter_turn(&state.working, turn),
            crop_base: state
                .crop_base
                .as_ref()
                .map(|base| apply_quarter_turn(base, turn)),
        };
        info!("rotate by {} degrees", turn.degrees());
        self.commit(next);
        Outcome::Applied
    }

    pub fn rotate_clockwise(&mut self) -> Outcome {
        self.rotate(-90)
    }

    pub fn rotate_counter_clockwise(&mut self) -> Outcome {
        self.rotate(90)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Restore the state before the most recent commit.
    pub fn undo(&mut self) -> Outcome {
        let Some(current) = self.state.take() else {
            return Outcome::Ignored(IgnoreReason::NothingToUndo);
        };
        match self.history.undo(current) {
            Ok(previous) => {
                self.restore(previous);
                info!("undo ({} left)", self.history.undo_depth());
                Outcome::Applied
            }
            Err(current) => {
                self.state = Some(current);
                debug!("undo ignored: history empty");
                Outcome::Ignored(IgnoreReason::NothingToUndo)
            }
        }
    }

    /// Re-apply the most recently undone commit.
    pub fn redo(&mut self) -> Outcome {
        let Some(current) = self.state.take() else {
            return Outcome::Ignored(IgnoreReason::NothingToRedo);
        };
        match self.history.redo(current) {
            Ok(next) => {
                self.restore(next);
                info!("redo ({} left)", self.history.redo_depth());
                Outcome::Applied
            }
            Err(current) => {
                self.state = Some(current);
                debug!("redo ignored: nothing undone");
                Outcome::Ignored(IgnoreReason::NothingToRedo)
            }
        }
    }

    /// Install `next` as the live state, recording the previous one.
    fn commit(&mut self, next: Pipeline) {
        if let Some(previous) = self.state.replace(next) {
            self.history.commit(previous);
        }
        self.refresh_previews();
    }

    fn restore(&mut self, state: Pipeline) {
        self.state = Some(state);
        self.drag.cancel();
        self.refresh_previews();
    }

    fn refresh_previews(&mut self) {
        self.previews = Previews::render(self.source(), self.working(), self.config.preview_size);
    }
}
