//! Text selection and URL detection
//!
//! Selection endpoints are pinned to the output stream rather than the
//! screen: an endpoint row counts lines written since the buffer was
//! created (the raw store index plus every line evicted from the front of
//! scrollback). New output never moves a selection, and endpoints whose
//! lines have been evicted simply resolve to nothing instead of faulting.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::buffer::Buffer;

/// How close together two mouse-downs must land to count as a multi-click
const MULTI_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// A selection endpoint in stream coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Stream row: raw index plus lines evicted before it
    pub row: i64,
    /// Column within the row
    pub col: usize,
}

/// Characters that delimit a word for double-click expansion
fn is_word_boundary(c: char) -> bool {
    matches!(
        c,
        ',' | ' ' | ':' | ';' | '\0' | '\'' | '"' | '[' | ']' | '(' | ')' | '{' | '}'
    )
}

/// Characters that delimit a URL token
fn is_url_boundary(c: char) -> bool {
    matches!(c, ' ' | '\0' | '\'' | '"' | '{' | '}')
}

impl Buffer {
    /// Begin a selection at a view position. A second click inside the
    /// multi-click window expands to the word under the cursor; a third
    /// click expands to the whole line.
    pub fn start_selection(&mut self, col: usize, view_row: usize) {
        let row = self.stream_row_from_view(view_row);

        if self.selection_complete {
            self.selection_end = None;

            let recent = self
                .selection_click
                .map(|t| t.elapsed() < MULTI_CLICK_WINDOW)
                .unwrap_or(false);
            if self.selection_start.is_some() && recent {
                if self.selection_expanded {
                    self.selection_start = Some(Position { row, col: 0 });
                    self.selection_end = Some(Position {
                        row,
                        col: self.view_width - 1,
                    });
                    self.mark_dirty();
                } else {
                    self.select_word_at_position(col, view_row);
                    self.selection_expanded = true;
                }
                return;
            }

            self.selection_expanded = false;
        }

        self.selection_complete = false;
        self.selection_start = Some(Position { row, col });
        self.selection_click = Some(std::time::Instant::now());
    }

    /// Move the selection focus. With `complete` the selection is sealed; a
    /// sealed selection ignores further updates, and a click that never left
    /// its anchor seals into no selection at all.
    pub fn end_selection(&mut self, col: usize, view_row: usize, complete: bool) {
        if self.selection_complete {
            return;
        }
        self.selection_complete = complete;

        let start = match self.selection_start {
            Some(start) => start,
            None => {
                self.selection_end = None;
                self.mark_dirty();
                return;
            }
        };

        let row = self.stream_row_from_view(view_row);
        if !(start.col == col && start.row == row && complete) {
            self.selection_end = Some(Position { row, col });
        }
        self.mark_dirty();
    }

    /// Select the word under a view position, bounded by the word-boundary
    /// character set.
    pub fn select_word_at_position(&mut self, col: usize, view_row: usize) {
        let row = self.stream_row_from_view(view_row);
        let raw = match self.raw_from_stream(row) {
            Some(raw) => raw,
            None => return,
        };
        let on_word = self
            .raw_cell(col, raw)
            .map(|cell| !cell.is_blank())
            .unwrap_or(false);
        if !on_word {
            return;
        }

        let mut start = col;
        let mut i = col as isize;
        while i >= 0 {
            match self.raw_cell(i as usize, raw) {
                Some(cell) if !is_word_boundary(cell.ch()) => {
                    start = i as usize;
                    i -= 1;
                }
                _ => break,
            }
        }

        let mut end = col;
        for i in col..self.view_width {
            match self.raw_cell(i, raw) {
                Some(cell) if !is_word_boundary(cell.ch()) => end = i,
                _ => break,
            }
        }

        self.selection_start = Some(Position { row, col: start });
        self.selection_end = Some(Position { row, col: end });
        self.mark_dirty();
    }

    /// Whether the cell at a view position lies inside the selection
    pub fn in_selection(&self, col: usize, view_row: usize) -> bool {
        let (p1, p2) = match self.normalized_selection() {
            Some(bounds) => bounds,
            None => return false,
        };
        let row = self.stream_row_from_view(view_row);
        (row > p1.row || (row == p1.row && col >= p1.col))
            && (row < p2.row || (row == p2.row && col <= p2.col))
    }

    /// Extract the selected text in reading order. Rows evicted from
    /// scrollback contribute nothing; blank cells render as spaces, matching
    /// line rendering. A newline separates rows only at hard line breaks.
    pub fn selected_text(&self) -> String {
        let (p1, p2) = match self.normalized_selection() {
            Some(bounds) => bounds,
            None => return String::new(),
        };

        let mut text = String::new();
        for row in p1.row..=p2.row {
            let raw = match self.raw_from_stream(row) {
                Some(raw) => raw,
                // before the retained window: skip; past it: done
                None if row < self.grid.evicted() as i64 => continue,
                None => break,
            };
            let line = match self.grid.line(raw) {
                Some(line) => line,
                None => break,
            };

            let mut min_col = 0;
            let mut max_col = self.view_width.saturating_sub(1);
            if row == p1.row {
                min_col = p1.col;
            } else if !line.is_wrapped() {
                text.push('\n');
            }
            if row == p2.row {
                max_col = p2.col;
            }

            for col in min_col..=max_col {
                match line.cell(col) {
                    Some(cell) => text.push(if cell.is_blank() { ' ' } else { cell.ch() }),
                    None => break,
                }
            }
        }
        text
    }

    /// Extract the URL token under a view position, or an empty string when
    /// the token is absent, relative, or fails to parse as an absolute URI.
    pub fn url_at_position(&self, col: usize, view_row: usize) -> String {
        let row = self.stream_row_from_view(view_row);
        let raw = match self.raw_from_stream(row) {
            Some(raw) => raw,
            None => return String::new(),
        };
        match self.raw_cell(col, raw) {
            Some(cell) if !is_url_boundary(cell.ch()) => {}
            _ => return String::new(),
        }

        let mut candidate = String::new();
        let mut i = col as isize;
        while i >= 0 {
            match self.raw_cell(i as usize, raw) {
                Some(cell) if !is_url_boundary(cell.ch()) => {
                    candidate.insert(0, cell.ch());
                    i -= 1;
                }
                _ => break,
            }
        }
        for i in (col + 1)..self.view_width {
            match self.raw_cell(i, raw) {
                Some(cell) if !is_url_boundary(cell.ch()) => candidate.push(cell.ch()),
                _ => break,
            }
        }

        if candidate.is_empty() || candidate.starts_with('/') {
            return String::new();
        }
        // any scheme followed by ':' and at least one further character
        match Url::parse(&candidate) {
            Ok(url) if candidate.len() > url.scheme().len() + 1 => candidate,
            _ => String::new(),
        }
    }

    fn normalized_selection(&self) -> Option<(Position, Position)> {
        let start = self.selection_start?;
        let end = self.selection_end?;
        if start <= end {
            Some((start, end))
        } else {
            Some((end, start))
        }
    }

    /// View position to stream row, honouring the current scroll offset
    fn stream_row_from_view(&self, view_row: usize) -> i64 {
        let raw = self
            .raw_from_view(view_row)
            .saturating_sub(self.scroll_offset);
        raw as i64 + self.grid.evicted() as i64
    }

    /// Stream row back to a raw index, if the line is still retained
    fn raw_from_stream(&self, row: i64) -> Option<usize> {
        let raw = row - self.grid.evicted() as i64;
        if raw < 0 || raw as usize >= self.grid.height() {
            None
        } else {
            Some(raw as usize)
        }
    }
}
