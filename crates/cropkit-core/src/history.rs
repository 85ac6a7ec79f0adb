//! Undo/redo stacks.
//!
//! A `History` belongs to exactly one session. Entries are owned values, so
//! whatever the session stores here is detached from its live state.

use std::collections::VecDeque;

/// Undo and redo stacks, most recent entry last.
#[derive(Debug, Clone)]
pub struct History<T> {
    undo: VecDeque<T>,
    redo: Vec<T>,
    limit: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T> History<T> {
    /// Create an empty history. With `Some(limit)`, the oldest undo entries
    /// are dropped once the stack grows past `limit`.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
        }
    }

    /// Record the state that precedes a new commit and drop the redo stack.
    pub fn commit(&mut self, previous: T) {
        self.push_undo(previous);
        self.redo.clear();
    }

    /// Step back: `current` goes to the redo stack and the most recent undo
    /// entry is returned.
    ///
    /// When there is nothing to undo, `current` is handed back as `Err`.
    pub fn undo(&mut self, current: T) -> Result<T, T> {
        match self.undo.pop_back() {
            Some(previous) => {
                self.redo.push(current);
                Ok(previous)
            }
            None => Err(current),
        }
    }

    /// Step forward: mirror image of [`History::undo`].
    pub fn redo(&mut self, current: T) -> Result<T, T> {
        match self.redo.pop() {
            Some(next) => {
                self.push_undo(current);
                Ok(next)
            }
            None => Err(current),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn push_undo(&mut self, state: T) {
        self.undo.push_back(state);
        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
            }
        }
    }
}
