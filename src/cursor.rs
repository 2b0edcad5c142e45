//! Cursor, saved cursor, modes and margins
//!
//! The cursor is a (column, row) pair in view coordinates. The column may
//! transiently equal the view width: that is the pending-wrap state, and it
//! is never a valid cell index.

use serde::{Deserialize, Serialize};

/// Cursor position in view coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Column, 0-indexed. Equal to the view width while a wrap is pending.
    pub col: usize,
    /// Row, 0-indexed, always within the view
    pub row: usize,
}

/// A single saved (column, row) snapshot for save/restore
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCursor {
    pub col: usize,
    pub row: usize,
}

/// Terminal mode flags owned by the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modes {
    /// DECAWM: writing past the right edge continues on a soft-wrapped line
    pub auto_wrap: bool,
    /// DECOM: absolute row positioning is relative to the top margin
    pub origin_mode: bool,
    /// IRM inverse: overwrite the cell at the cursor instead of inserting
    pub replace_mode: bool,
    /// LNM: line feed also performs a carriage return
    pub new_line_mode: bool,
}

impl Default for Modes {
    fn default() -> Self {
        Modes {
            auto_wrap: true,
            origin_mode: false,
            replace_mode: false,
            new_line_mode: true,
        }
    }
}

/// Inclusive DECSTBM scroll-region bounds in view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub top: usize,
    pub bottom: usize,
}

impl Margins {
    /// Margins spanning the whole view
    pub fn full(view_height: usize) -> Self {
        Margins {
            top: 0,
            bottom: view_height.saturating_sub(1),
        }
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.top && row <= self.bottom
    }
}
