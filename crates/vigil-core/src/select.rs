use vigil_types::Region;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Dragging,
    Done,
}

/// Single-shot drag-selection state machine: idle until the pointer goes
/// down, tracks the pointer while dragging, commits the opposite corner on
/// release. Events that arrive out of phase are ignored.
///
/// The overlay that owns pointer input feeds events in and draws the
/// [`preview`](Self::preview) rectangle; nothing is committed until
/// [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct SelectionState {
    phase: Phase,
    anchor: (i32, i32),
    cursor: (i32, i32),
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            anchor: (0, 0),
            cursor: (0, 0),
        }
    }

    pub fn pointer_down(&mut self, x: i32, y: i32) {
        if self.phase == Phase::Idle {
            self.anchor = (x, y);
            self.cursor = (x, y);
            self.phase = Phase::Dragging;
        }
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) {
        if self.phase == Phase::Dragging {
            self.cursor = (x, y);
        }
    }

    pub fn pointer_up(&mut self, x: i32, y: i32) {
        if self.phase == Phase::Dragging {
            self.cursor = (x, y);
            self.phase = Phase::Done;
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Normalized rectangle between the anchor and the current cursor, for
    /// visual feedback while dragging. Zero-size edges are allowed here; only
    /// `finish` rejects them.
    pub fn preview(&self) -> Option<(i32, i32, u32, u32)> {
        if self.phase == Phase::Idle {
            return None;
        }
        let (ax, ay) = self.anchor;
        let (cx, cy) = self.cursor;
        Some((ax.min(cx), ay.min(cy), ax.abs_diff(cx), ay.abs_diff(cy)))
    }

    /// Commits the gesture. Errors when the gesture never completed or
    /// collapsed to a zero-area rectangle.
    pub fn finish(self) -> Result<Region> {
        if self.phase != Phase::Done {
            return Err(Error::EmptySelection);
        }
        Region::from_corners(self.anchor, self.cursor).ok_or(Error::EmptySelection)
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}
