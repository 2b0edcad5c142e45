//! Error types for buffer operations.
//!
//! The buffer is driven by a best-effort stream, so almost every failure
//! mode is a silent clamp or an absent result. The exceptions that reach the
//! caller are listed here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("view size {cols}x{rows} is invalid: both dimensions must be at least 1")]
    InvalidSize { cols: usize, rows: usize },
}
