//! Snapshots and diagnostic file helpers
//!
//! A snapshot captures the visible screen as plain text for golden tests
//! and debug dumps. The save/compare helpers are the only code in the crate
//! that touches the filesystem.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffer::Buffer;

/// A plain-text capture of the visible screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub columns: usize,
    /// Visible rows, top to bottom, honouring the scroll offset
    pub rows: Vec<String>,
    pub cursor_col: usize,
    pub cursor_row: usize,
}

impl Snapshot {
    /// Serialize to pretty JSON for debug dumps
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Buffer {
    /// Capture the visible screen
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            columns: self.view_width(),
            rows: self.visible_lines().iter().map(|line| line.text()).collect(),
            cursor_col: self.cursor_column(),
            cursor_row: self.cursor_row(),
        }
    }

    /// Write the plain-text rendering of every retained line to a file,
    /// newline-joined.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.render_all())
    }

    /// Compare the file at `path` against the current rendering
    pub fn compare(&self, path: impl AsRef<Path>) -> io::Result<bool> {
        let content = fs::read_to_string(path)?;
        Ok(content == self.render_all())
    }

    fn render_all(&self) -> String {
        let mut out = String::new();
        for raw in 0..self.height() {
            if let Some(line) = self.line(raw) {
                if raw > 0 {
                    out.push('\n');
                }
                out.push_str(&line.text());
            }
        }
        out
    }
}
