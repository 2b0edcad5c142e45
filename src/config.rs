//! Construction defaults for the buffer
//!
//! The host owns configuration loading; this struct is only the
//! deserializable shape it hands over when building a buffer.

use serde::{Deserialize, Serialize};

use crate::error::BufferError;
use crate::grid::DEFAULT_MAX_LINES;

/// Buffer construction parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial view width in columns
    pub columns: usize,
    /// Initial view height in rows
    pub rows: usize,
    /// Maximum retained lines, scrollback and visible window combined
    pub max_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            columns: 80,
            rows: 24,
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(BufferError::InvalidSize {
                cols: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }
}
