//! Terminal buffer core
//!
//! This crate is the in-memory screen model of a VT-style terminal
//! emulator: a bounded grid of styled cells fed by an escape-sequence
//! parser and read by a renderer. It owns the cell grid, scrollback
//! history, cursor, DECSTBM margins, line wrapping, resize reflow and
//! text selection.
//!
//! The crate has no I/O beyond optional diagnostic dumps and no knowledge
//! of PTYs, escape sequences or rendering. It is single-threaded and
//! non-reentrant; the host serialises parser writes and renderer reads.
//!
//! # Example
//!
//! ```
//! use termbuf::{Buffer, CellAttributes};
//!
//! let mut buf = Buffer::new(80, 24, CellAttributes::default(), 10_000);
//! buf.write_str("hello, world");
//! buf.new_line();
//!
//! assert_eq!(buf.line(0).unwrap().text(), "hello, world");
//! assert!(buf.is_dirty());
//! ```

pub mod buffer;
pub mod cell;
pub mod config;
pub mod cursor;
pub mod error;
pub mod grid;
pub mod line;
pub mod selection;
pub mod snapshot;

pub use buffer::Buffer;
pub use cell::{Cell, CellAttributes, Color};
pub use config::Config;
pub use cursor::{Cursor, Margins, Modes, SavedCursor};
pub use error::BufferError;
pub use grid::Grid;
pub use line::Line;
pub use selection::Position;
pub use snapshot::Snapshot;
