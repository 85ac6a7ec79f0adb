//! Pending rectangle tracking between pointer-down and pointer-up.

use crate::geometry::Point;

/// Tracks the rectangle being dragged out in display coordinates.
///
/// The rectangle only exists between [`DragTracker::begin`] and
/// [`DragTracker::finish`] (or [`DragTracker::cancel`]).
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    start: Option<Point>,
    current: Option<Point>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new rectangle at `point`, discarding any unfinished one.
    pub fn begin(&mut self, point: Point) {
        self.start = Some(point);
        self.current = Some(point);
    }

    /// Move the free corner. Returns `false` when no drag is in progress.
    pub fn update(&mut self, point: Point) -> bool {
        if self.start.is_none() {
            return false;
        }
        self.current = Some(point);
        true
    }

    /// End the drag at `point` and return both corners `(start, end)`.
    ///
    /// The tracker is cleared whether or not a drag was in progress.
    pub fn finish(&mut self, point: Point) -> Option<(Point, Point)> {
        let start = self.start.take();
        self.current = None;
        start.map(|start| (start, point))
    }

    pub fn cancel(&mut self) {
        self.start = None;
        self.current = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Current corners, for drawing the selection overlay.
    pub fn rect(&self) -> Option<(Point, Point)> {
        self.start.zip(self.current)
    }
}
