//! Terminal buffer implementation
//!
//! The buffer owns the bounded line store, the cursor, the DECSTBM margins
//! and the terminal modes, and translates a stream of code points and
//! high-level operations into cell mutations. The host's escape-sequence
//! parser drives the mutating API; the renderer reads the query API.
//!
//! Coordinates come in two flavours. *Raw* rows index the whole store, with
//! row 0 the oldest retained line. *View* rows index the visible window: view
//! row `r` maps to raw row `height - view_height + r` once enough lines
//! exist. A non-zero scroll offset shifts the window that many rows earlier
//! for queries, never for writes.

use crate::cell::{Cell, CellAttributes};
use crate::cursor::{Cursor, Margins, Modes, SavedCursor};
use crate::error::BufferError;
use crate::grid::Grid;
use crate::line::Line;
use crate::selection::Position;

const TAB_SIZE: usize = 4;

/// The terminal screen model: grid, scrollback, cursor, margins and modes
#[derive(Debug, Clone)]
pub struct Buffer {
    pub(crate) grid: Grid,
    pub(crate) cursor: Cursor,
    saved_cursor: SavedCursor,
    pub(crate) view_width: usize,
    pub(crate) view_height: usize,
    cursor_attr: CellAttributes,
    default_cell: Cell,
    /// How many rows earlier than the live bottom the view is showing
    pub(crate) scroll_offset: usize,
    margins: Margins,
    modes: Modes,
    dirty: bool,
    /// Configured cap; the effective cap never drops below the view height
    max_lines: usize,
    pub(crate) selection_start: Option<Position>,
    pub(crate) selection_end: Option<Position>,
    pub(crate) selection_complete: bool,
    pub(crate) selection_expanded: bool,
    pub(crate) selection_click: Option<std::time::Instant>,
}

impl Buffer {
    /// Create a buffer with the given view size, initial attributes and
    /// retained-line cap. Zero dimensions are raised to 1.
    pub fn new(columns: usize, rows: usize, attr: CellAttributes, max_lines: usize) -> Self {
        if columns == 0 || rows == 0 {
            log::debug!("buffer created with zero dimension {}x{}", columns, rows);
        }
        let columns = columns.max(1);
        let rows = rows.max(1);
        Buffer {
            grid: Grid::new(max_lines.max(rows)),
            cursor: Cursor::default(),
            saved_cursor: SavedCursor::default(),
            view_width: columns,
            view_height: rows,
            cursor_attr: attr,
            default_cell: Cell::blank(attr),
            scroll_offset: 0,
            margins: Margins::full(rows),
            modes: Modes::default(),
            dirty: false,
            max_lines,
            selection_start: None,
            selection_end: None,
            selection_complete: false,
            selection_expanded: false,
            selection_click: None,
        }
    }

    /// Create a buffer from validated configuration
    pub fn from_config(config: &crate::config::Config) -> Result<Self, BufferError> {
        config.validate()?;
        Ok(Buffer::new(
            config.columns,
            config.rows,
            CellAttributes::default(),
            config.max_lines,
        ))
    }

    // ── Dimensions and queries ──────────────────────────────────────────

    pub fn view_width(&self) -> usize {
        self.view_width
    }

    pub fn view_height(&self) -> usize {
        self.view_height
    }

    /// Total retained lines, scrollback and visible window combined
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn cursor_column(&self) -> usize {
        self.cursor.col
    }

    /// Cursor row in view coordinates
    pub fn cursor_row(&self) -> usize {
        self.cursor.row
    }

    /// The cursor's row translated to a raw store index
    pub fn raw_row(&self) -> usize {
        self.raw_from_view(self.cursor.row)
    }

    pub fn top_margin(&self) -> usize {
        self.margins.top
    }

    pub fn bottom_margin(&self) -> usize {
        self.margins.bottom
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_auto_wrap(&self) -> bool {
        self.modes.auto_wrap
    }

    pub fn is_new_line_mode(&self) -> bool {
        self.modes.new_line_mode
    }

    /// The writer's current attributes, applied to newly written cells
    pub fn cursor_attributes(&self) -> &CellAttributes {
        &self.cursor_attr
    }

    pub fn cursor_attributes_mut(&mut self) -> &mut CellAttributes {
        &mut self.cursor_attr
    }

    /// Line at a raw store index
    pub fn line(&self, raw: usize) -> Option<&Line> {
        self.grid.line(raw)
    }

    /// Cell at view coordinates (ignores the scroll offset, like the cursor)
    pub fn cell(&self, view_col: usize, view_row: usize) -> Option<&Cell> {
        self.raw_cell(view_col, self.raw_from_view(view_row))
    }

    /// Cell at a raw row; absent for any out-of-range coordinate
    pub fn raw_cell(&self, col: usize, raw: usize) -> Option<&Cell> {
        self.grid.line(raw).and_then(|line| line.cell(col))
    }

    /// The visible window, top to bottom, honouring the scroll offset.
    /// Fewer than `view_height` lines are returned while the store is short.
    pub fn visible_lines(&self) -> Vec<&Line> {
        let height = self.grid.height() as isize;
        let top = height - self.view_height as isize;
        let mut lines = Vec::with_capacity(self.view_height);
        for i in 0..self.view_height as isize {
            let raw = top + i - self.scroll_offset as isize;
            if raw >= 0 && raw < height {
                if let Some(line) = self.grid.line(raw as usize) {
                    lines.push(line);
                }
            }
        }
        lines
    }

    /// Whether a non-default scroll region is configured
    pub fn has_scrollable_region(&self) -> bool {
        self.margins.top > 0 || self.margins.bottom < self.view_height.saturating_sub(1)
    }

    /// Whether the cursor currently sits inside a non-default scroll region
    pub fn in_scrollable_region(&self) -> bool {
        self.has_scrollable_region() && self.margins.contains(self.cursor.row)
    }

    /// Read and clear the dirty flag in one call
    pub fn is_dirty(&mut self) -> bool {
        let dirty = self.dirty;
        self.dirty = false;
        dirty
    }

    // ── Modes ───────────────────────────────────────────────────────────

    pub fn set_auto_wrap(&mut self, enabled: bool) {
        self.modes.auto_wrap = enabled;
    }

    pub fn set_origin_mode(&mut self, enabled: bool) {
        self.modes.origin_mode = enabled;
        self.set_position(0, 0);
    }

    pub fn set_insert_mode(&mut self) {
        self.modes.replace_mode = false;
    }

    pub fn set_replace_mode(&mut self) {
        self.modes.replace_mode = true;
    }

    /// LNM set: line feed also performs a carriage return
    pub fn set_new_line_mode(&mut self) {
        self.modes.new_line_mode = true;
    }

    /// LNM reset: line feed moves down only
    pub fn set_line_feed_mode(&mut self) {
        self.modes.new_line_mode = false;
    }

    // ── Margins ─────────────────────────────────────────────────────────

    /// Set the DECSTBM scroll region and home the cursor. Out-of-order or
    /// out-of-range bounds are clamped.
    pub fn set_vertical_margins(&mut self, top: usize, bottom: usize) {
        let max = self.view_height.saturating_sub(1);
        let bottom_clamped = bottom.min(max);
        let top_clamped = top.min(bottom_clamped);
        if top_clamped != top || bottom_clamped != bottom {
            log::debug!(
                "margins ({}, {}) clamped to ({}, {})",
                top,
                bottom,
                top_clamped,
                bottom_clamped
            );
        }
        self.margins = Margins {
            top: top_clamped,
            bottom: bottom_clamped,
        };
        self.set_position(0, 0);
    }

    pub fn reset_vertical_margins(&mut self) {
        self.margins = Margins::full(self.view_height);
    }

    // ── Cursor movement ─────────────────────────────────────────────────

    pub fn save_cursor(&mut self) {
        self.saved_cursor = SavedCursor {
            col: self.cursor.col,
            row: self.cursor.row,
        };
    }

    pub fn restore_cursor(&mut self) {
        self.cursor.col = self.saved_cursor.col.min(self.view_width);
        self.cursor.row = self
            .saved_cursor
            .row
            .min(self.view_height.saturating_sub(1));
    }

    /// Move the cursor to an absolute position. Under origin mode the row is
    /// relative to the top margin and clamped at the bottom margin; otherwise
    /// it is clamped at the last view row. The column is clamped at the last
    /// view column.
    pub fn set_position(&mut self, col: usize, row: usize) {
        let mut use_col = col;
        let mut use_row = row;
        let mut max_row = self.view_height.saturating_sub(1);

        if self.modes.origin_mode {
            use_row += self.margins.top;
            max_row = self.margins.bottom;
        }
        if use_row > max_row {
            use_row = max_row;
        }
        if use_col >= self.view_width {
            log::debug!(
                "cursor column {} clamped to view width {}",
                col,
                self.view_width
            );
            use_col = self.view_width - 1;
        }

        self.cursor.col = use_col;
        self.cursor.row = use_row;
        self.mark_dirty();
    }

    /// Move the cursor relatively; coordinates that would go negative stop
    /// at zero.
    pub fn move_position(&mut self, dx: isize, dy: isize) {
        let to_col = (self.cursor.col as isize + dx).max(0) as usize;
        let to_row = (self.origin_adjusted_row() as isize + dy).max(0) as usize;
        self.set_position(to_col, to_row);
    }

    fn origin_adjusted_row(&self) -> usize {
        if self.modes.origin_mode {
            self.cursor.row.saturating_sub(self.margins.top)
        } else {
            self.cursor.row
        }
    }

    // ── Writer ──────────────────────────────────────────────────────────

    /// Write a sequence of code points at the cursor. Any input snaps the
    /// view back to the live bottom.
    pub fn write<I>(&mut self, runes: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.scroll_offset = 0;
        for c in runes {
            self.write_char(c);
        }
        self.mark_dirty();
    }

    /// Convenience for writing every char of a string slice
    pub fn write_str(&mut self, s: &str) {
        self.write(s.chars());
    }

    fn write_char(&mut self, c: char) {
        if self.modes.replace_mode {
            if self.cursor.col >= self.view_width {
                // no wrap when overwriting off the right edge
                return;
            }
            self.put_at_cursor(c);
            self.advance_cursor();
            return;
        }

        if self.cursor.col >= self.view_width {
            if !self.modes.auto_wrap {
                return;
            }
            self.new_line_forced();
            let fill = self.default_cell;
            let attr = self.cursor_attr;
            let line = self.current_line_mut();
            line.set_wrapped(true);
            line.pad_to(1, fill);
            line.cells[0] = Cell::with_attrs(c, attr);
        } else {
            self.put_at_cursor(c);
        }
        self.advance_cursor();
    }

    fn put_at_cursor(&mut self, c: char) {
        let col = self.cursor.col;
        let fill = self.default_cell;
        let attr = self.cursor_attr;
        let line = self.current_line_mut();
        line.pad_to(col + 1, fill);
        line.cells[col] = Cell::with_attrs(c, attr);
    }

    /// The cursor may step one column past the last cell; that pending-wrap
    /// position is where auto-wrap is decided on the next write.
    fn advance_cursor(&mut self) {
        if self.cursor.col < self.view_width {
            self.cursor.col += 1;
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor.col == 0 {
            let wrapped = self.current_line().map(Line::is_wrapped).unwrap_or(false);
            if wrapped {
                self.move_position(self.view_width as isize - 1, -1);
            }
        } else if self.cursor.col == self.view_width {
            // pending-wrap: the cursor sits past the cell it last wrote
            self.move_position(-2, 0);
        } else {
            self.move_position(-1, 0);
        }
    }

    /// Return to column zero of the first segment of the current logical
    /// line, walking up through soft-wrapped continuations.
    pub fn carriage_return(&mut self) {
        loop {
            match self.current_line() {
                Some(line) if line.is_wrapped() && self.cursor.row > 0 => {
                    self.cursor.row -= 1;
                }
                _ => break,
            }
        }
        self.cursor.col = 0;
        self.mark_dirty();
    }

    /// Advance to the next multiple-of-4 column by writing spaces, stopping
    /// at the last view column.
    pub fn tab(&mut self) {
        if self.cursor.col >= self.view_width {
            return;
        }
        let target = ((self.cursor.col / TAB_SIZE) + 1) * TAB_SIZE;
        let target = target.min(self.view_width - 1);
        let shift = target.saturating_sub(self.cursor.col);
        self.write(std::iter::repeat(' ').take(shift));
    }

    pub fn new_line(&mut self) {
        self.new_line_ex(false);
    }

    /// Line feed with carriage-return semantics forced regardless of LNM
    pub fn new_line_forced(&mut self) {
        self.new_line_ex(true);
    }

    fn new_line_ex(&mut self, force_cr: bool) {
        if self.modes.new_line_mode || force_cr {
            self.cursor.col = 0;
        }
        self.index();
        // an explicit line feed always lands on a non-continuation line
        loop {
            match self.current_line() {
                Some(line) if line.is_wrapped() => self.index(),
                _ => break,
            }
        }
    }

    // ── Scroll-region engine ────────────────────────────────────────────

    /// Move the active position down one line. At the bottom margin of an
    /// active region the region scrolls up; at the bottom of an unregioned
    /// view a new line is appended, evicting the oldest past the cap.
    pub fn index(&mut self) {
        self.mark_dirty();

        if self.in_scrollable_region() {
            if self.cursor.row < self.margins.bottom {
                self.cursor.row += 1;
            } else {
                let top = self.ensure_view_row(self.margins.top);
                let bottom = self.ensure_view_row(self.margins.bottom);
                for i in top..bottom {
                    let next = self.grid[i + 1].clone();
                    self.grid[i] = next;
                }
                self.grid[bottom] = Line::new();
            }
            return;
        }

        if self.cursor.row + 1 >= self.view_height {
            self.grid.push(Line::new());
        } else {
            self.cursor.row += 1;
        }
    }

    /// Move the active position up one line. At the top margin of an active
    /// region the region scrolls down.
    pub fn reverse_index(&mut self) {
        self.mark_dirty();

        if self.in_scrollable_region() {
            if self.cursor.row > self.margins.top {
                self.cursor.row -= 1;
            } else {
                let top = self.ensure_view_row(self.margins.top);
                let bottom = self.ensure_view_row(self.margins.bottom);
                for i in ((top + 1)..=bottom).rev() {
                    let prev = self.grid[i - 1].clone();
                    self.grid[i] = prev;
                }
                self.grid[top] = Line::new();
            }
            return;
        }

        if self.cursor.row > 0 {
            self.cursor.row -= 1;
        }
    }

    /// Insert blank lines at the cursor row. A no-op when a scroll region is
    /// active and the cursor is outside it.
    pub fn insert_lines(&mut self, count: usize) {
        if self.has_scrollable_region() && !self.in_scrollable_region() {
            return;
        }
        self.cursor.col = 0;
        for _ in 0..count {
            self.insert_line();
        }
        self.mark_dirty();
    }

    fn insert_line(&mut self) {
        let pos = self.ensure_view_row(self.cursor.row);
        if self.in_scrollable_region() {
            let bottom = self.ensure_view_row(self.margins.bottom);
            self.grid.remove(bottom);
            self.grid.insert(pos.min(bottom), Line::new());
        } else {
            self.grid.insert(pos, Line::new());
        }
    }

    /// Delete lines at the cursor row, closing the gap from below within the
    /// region. A no-op when a scroll region is active and the cursor is
    /// outside it.
    pub fn delete_lines(&mut self, count: usize) {
        if self.has_scrollable_region() && !self.in_scrollable_region() {
            return;
        }
        self.cursor.col = 0;
        for _ in 0..count {
            self.delete_line();
        }
        self.mark_dirty();
    }

    fn delete_line(&mut self) {
        let pos = self.ensure_view_row(self.cursor.row);
        let bottom = self.ensure_view_row(self.margins.bottom);
        if self.grid.remove(pos).is_none() {
            return;
        }
        // the region bottom keeps the store height stable
        self.grid.insert(bottom, Line::new());
    }

    /// Insert blank cells at the cursor, shifting the rest of the line
    /// right. Cells pushed past the view width stay in the line until the
    /// next reflow trims them.
    pub fn insert_blank_characters(&mut self, count: usize) {
        let col = self.cursor.col;
        let fill = self.default_cell;
        let line = self.current_line_mut();
        let at = col.min(line.cells.len());
        for _ in 0..count {
            line.cells.insert(at, fill);
        }
        self.mark_dirty();
    }

    /// Remove cells at the cursor, shifting the rest of the line left
    pub fn delete_chars(&mut self, count: usize) {
        let col = self.cursor.col;
        let line = self.current_line_mut();
        if col >= line.cells.len() {
            return;
        }
        let count = count.min(line.cells.len() - col);
        line.cells.drain(col..col + count);
        self.mark_dirty();
    }

    /// Blank cells at the cursor in place, without shifting
    pub fn erase_characters(&mut self, count: usize) {
        let col = self.cursor.col;
        let bg = self.default_cell.bg();
        let line = self.current_line_mut();
        let end = (col + count).min(line.cells.len());
        for cell in &mut line.cells[col.min(end)..end] {
            cell.erase(bg);
        }
        self.mark_dirty();
    }

    // ── Erase family ────────────────────────────────────────────────────

    pub fn erase_line(&mut self) {
        self.current_line_mut().clear();
        self.mark_dirty();
    }

    pub fn erase_line_to_cursor(&mut self) {
        let col = self.cursor.col;
        let bg = self.default_cell.bg();
        let line = self.current_line_mut();
        let end = col.min(line.cells.len().saturating_sub(1));
        if !line.cells.is_empty() {
            line.erase_range(0, end, bg);
        }
        self.mark_dirty();
    }

    /// Truncate the line at the cursor, then pad with erased cells out to
    /// the view width.
    pub fn erase_line_from_cursor(&mut self) {
        let col = self.cursor.col;
        let width = self.view_width;
        let blank = Cell::blank(CellAttributes {
            bg: self.default_cell.bg(),
            ..CellAttributes::default()
        });
        let line = self.current_line_mut();
        line.truncate(col);
        line.pad_to(width, blank);
        self.mark_dirty();
    }

    pub fn erase_display(&mut self) {
        for view_row in 0..self.view_height {
            let raw = self.raw_from_view(view_row);
            if let Some(line) = self.grid.line_mut(raw) {
                line.clear();
            }
        }
        self.mark_dirty();
    }

    pub fn erase_display_from_cursor(&mut self) {
        let col = self.cursor.col;
        let line = self.current_line_mut();
        line.truncate(col.min(line.cells.len()));
        for view_row in (self.cursor.row + 1)..self.view_height {
            let raw = self.raw_from_view(view_row);
            if let Some(line) = self.grid.line_mut(raw) {
                line.clear();
            }
        }
        self.mark_dirty();
    }

    pub fn erase_display_to_cursor(&mut self) {
        let col = self.cursor.col;
        let bg = self.default_cell.bg();
        let line = self.current_line_mut();
        if !line.cells.is_empty() {
            let end = col.min(line.cells.len() - 1);
            line.erase_range(0, end, bg);
        }
        for view_row in 0..self.cursor.row {
            let raw = self.raw_from_view(view_row);
            if let Some(line) = self.grid.line_mut(raw) {
                line.clear();
            }
        }
        self.mark_dirty();
    }

    /// Push a fresh screen's worth of blank lines, scrolling everything
    /// visible into history, and home the cursor.
    pub fn clear(&mut self) {
        for _ in 0..self.view_height {
            self.grid.push(Line::new());
        }
        self.set_position(0, 0);
        self.mark_dirty();
    }

    // ── Scroll offset ───────────────────────────────────────────────────

    /// Shift the view earlier into history
    pub fn scroll_up(&mut self, lines: usize) {
        if self.grid.height() < self.view_height {
            return;
        }
        let max = self.grid.height() - self.view_height;
        self.scroll_offset = (self.scroll_offset + lines).min(max);
        self.mark_dirty();
    }

    /// Shift the view back toward the live bottom
    pub fn scroll_down(&mut self, lines: usize) {
        if self.grid.height() < self.view_height {
            return;
        }
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        self.mark_dirty();
    }

    pub fn scroll_page_up(&mut self) {
        self.scroll_up(self.view_height);
    }

    pub fn scroll_page_down(&mut self) {
        self.scroll_down(self.view_height);
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll_offset = 0;
        self.mark_dirty();
    }

    // ── Resize and reflow ───────────────────────────────────────────────

    /// Resize the view, rewrapping long lines so logical content stays
    /// continuous. Zero dimensions are rejected and leave the buffer
    /// untouched.
    pub fn resize_view(&mut self, width: usize, height: usize) -> Result<(), BufferError> {
        if width == 0 || height == 0 {
            log::debug!("rejected resize to {}x{}", width, height);
            return Err(BufferError::InvalidSize {
                cols: width,
                rows: height,
            });
        }

        // distance of the cursor from the end of its line survives reflow
        let cur = self.ensure_view_row(self.cursor.row);
        let d = self.grid[cur].len() as isize - (self.cursor.col as isize + 1);

        // reflow first, evict at the end
        self.grid.set_max_lines(usize::MAX);
        if width > self.view_width {
            self.rewrap_wider(width);
        }
        // wraps shrink overflow, and trims lines stretched past the old
        // width by character insertion
        self.rewrap_narrower(width);

        self.view_width = width;
        self.view_height = height;
        self.grid.set_max_lines(self.max_lines.max(height));

        let last = self.grid.height().saturating_sub(1);
        self.cursor.row = last.min(height - 1);

        let raw = self.raw_from_view(self.cursor.row);
        let len = self.grid.line(raw).map(|l| l.len()).unwrap_or(0) as isize;
        self.cursor.col = (len - d - 1).clamp(0, width as isize) as usize;

        self.scroll_offset = 0;
        self.reset_vertical_margins();
        self.mark_dirty();
        Ok(())
    }

    /// Shrinking walk: overflow cells move onto the following continuation
    /// line when one exists, otherwise onto a freshly inserted one.
    fn rewrap_narrower(&mut self, width: usize) {
        let mut i = 0;
        while i < self.grid.height() {
            if self.grid[i].len() > width {
                let overflow: Vec<Cell> = self.grid[i].cells.split_off(width);
                let next_is_wrapped =
                    i + 1 < self.grid.height() && self.grid[i + 1].is_wrapped();
                if next_is_wrapped {
                    let next = &mut self.grid[i + 1];
                    let tail = std::mem::take(&mut next.cells);
                    next.cells = overflow;
                    next.cells.extend(tail);
                } else {
                    let mut continuation = Line::new();
                    continuation.set_wrapped(true);
                    continuation.cells = overflow;
                    self.grid.insert(i + 1, continuation);
                }
            }
            i += 1;
        }
    }

    /// Growing walk: pull as many cells as fit from each following
    /// continuation line, dropping continuations that empty out.
    fn rewrap_wider(&mut self, width: usize) {
        let mut i = 0;
        while i + 1 < self.grid.height() {
            loop {
                if i + 1 >= self.grid.height() || !self.grid[i + 1].is_wrapped() {
                    break;
                }
                let space = width.saturating_sub(self.grid[i].len());
                if space == 0 {
                    break;
                }
                let take = space.min(self.grid[i + 1].len());
                let moved: Vec<Cell> = self.grid[i + 1].cells.drain(..take).collect();
                self.grid[i].cells.extend(moved);
                if self.grid[i + 1].is_empty() {
                    self.grid.remove(i + 1);
                } else {
                    break;
                }
            }
            i += 1;
        }
    }

    // ── Internal helpers ────────────────────────────────────────────────

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Map a view row to a raw store index for the live (unscrolled) window
    pub(crate) fn raw_from_view(&self, view_row: usize) -> usize {
        let height = self.grid.height();
        if self.view_height > height {
            view_row
        } else {
            view_row + height - self.view_height
        }
    }

    /// Like `raw_from_view`, but guarantees the line exists by appending
    /// blanks while the store is still shorter than the view.
    fn ensure_view_row(&mut self, view_row: usize) -> usize {
        let view_row = view_row.min(self.view_height.saturating_sub(1));
        while self.grid.height() < self.view_height && self.grid.height() <= view_row {
            self.grid.push(Line::new());
        }
        self.raw_from_view(view_row)
    }

    fn current_line(&self) -> Option<&Line> {
        self.grid.line(self.raw_from_view(self.cursor.row))
    }

    fn current_line_mut(&mut self) -> &mut Line {
        let raw = self.ensure_view_row(self.cursor.row);
        &mut self.grid[raw]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(cols: usize, rows: usize) -> Buffer {
        Buffer::new(cols, rows, CellAttributes::default(), 100)
    }

    fn view_text(buf: &Buffer) -> Vec<String> {
        buf.visible_lines().iter().map(|l| l.text()).collect()
    }

    #[test]
    fn test_write_advances_cursor() {
        let mut buf = buffer(80, 24);
        buf.write_str("Hi");
        assert_eq!(buf.cursor_column(), 2);
        assert_eq!(buf.cursor_row(), 0);
        assert_eq!(buf.cell(0, 0).unwrap().ch(), 'H');
        assert_eq!(buf.cell(1, 0).unwrap().ch(), 'i');
    }

    #[test]
    fn test_write_pending_wrap_state() {
        let mut buf = buffer(5, 3);
        buf.write_str("abcde");
        // cursor rests one past the last cell until the next write
        assert_eq!(buf.cursor_column(), 5);
        assert_eq!(buf.cursor_row(), 0);
        assert_eq!(buf.height(), 1);
    }

    #[test]
    fn test_write_auto_wrap() {
        let mut buf = buffer(5, 3);
        buf.write_str("abcdefg");
        assert_eq!(view_text(&buf), vec!["abcde", "fg"]);
        assert!(buf.line(1).unwrap().is_wrapped());
        assert!(!buf.line(0).unwrap().is_wrapped());
        assert_eq!(buf.cursor_column(), 2);
        assert_eq!(buf.cursor_row(), 1);
    }

    #[test]
    fn test_write_no_wrap_when_disabled() {
        let mut buf = buffer(5, 3);
        buf.set_auto_wrap(false);
        buf.write_str("abcdefg");
        assert_eq!(buf.height(), 1);
        assert_eq!(buf.cursor_column(), 5);
        assert_eq!(buf.line(0).unwrap().text(), "abcde");
    }

    #[test]
    fn test_replace_mode_overwrites() {
        let mut buf = buffer(5, 3);
        buf.write_str("abc");
        buf.set_position(0, 0);
        buf.set_replace_mode();
        buf.write_str("XY");
        assert_eq!(buf.line(0).unwrap().text(), "XYc");
    }

    #[test]
    fn test_replace_mode_stops_at_edge() {
        let mut buf = buffer(3, 2);
        buf.set_replace_mode();
        buf.write_str("abcdef");
        assert_eq!(buf.height(), 1);
        assert_eq!(buf.line(0).unwrap().text(), "abc");
    }

    #[test]
    fn test_carriage_return_walks_wrapped_segments() {
        let mut buf = buffer(5, 3);
        buf.write_str("abcdefg");
        buf.carriage_return();
        assert_eq!(buf.cursor_column(), 0);
        assert_eq!(buf.cursor_row(), 0);
    }

    #[test]
    fn test_backspace_pending_wrap() {
        let mut buf = buffer(5, 3);
        buf.write_str("abcde");
        assert_eq!(buf.cursor_column(), 5);
        buf.backspace();
        assert_eq!(buf.cursor_column(), 3);
    }

    #[test]
    fn test_backspace_onto_previous_segment() {
        let mut buf = buffer(5, 3);
        buf.write_str("abcdef");
        buf.set_position(0, 1);
        buf.backspace();
        assert_eq!(buf.cursor_row(), 0);
        assert_eq!(buf.cursor_column(), 4);
    }

    #[test]
    fn test_tab_advances_to_next_stop() {
        let mut buf = buffer(20, 3);
        buf.write_str("a");
        buf.tab();
        assert_eq!(buf.cursor_column(), 4);
        buf.tab();
        assert_eq!(buf.cursor_column(), 8);
    }

    #[test]
    fn test_tab_clamps_at_last_column() {
        let mut buf = buffer(6, 3);
        buf.set_position(4, 0);
        buf.tab();
        assert_eq!(buf.cursor_column(), 5);
    }

    #[test]
    fn test_index_appends_at_bottom() {
        let mut buf = buffer(10, 3);
        buf.write_str("a");
        buf.new_line();
        buf.write_str("b");
        buf.new_line();
        buf.write_str("c");
        assert_eq!(buf.height(), 3);
        buf.index();
        assert_eq!(buf.height(), 4);
        assert_eq!(buf.cursor_row(), 2);
    }

    #[test]
    fn test_index_eviction_at_cap() {
        let mut buf = Buffer::new(4, 3, CellAttributes::default(), 4);
        for i in 0..8 {
            buf.write_str(&i.to_string());
            buf.new_line();
        }
        assert_eq!(buf.height(), 4);
    }

    #[test]
    fn test_reverse_index_scrolls_region_down() {
        let mut buf = buffer(4, 5);
        for s in ["A", "B", "C", "D", "E"] {
            buf.write_str(s);
            if s != "E" {
                buf.new_line();
            }
        }
        buf.set_vertical_margins(1, 3);
        buf.set_position(0, 1);
        buf.reverse_index();
        assert_eq!(view_text(&buf), vec!["A", "", "B", "C", "E"]);
        assert_eq!(buf.cursor_row(), 1);
    }

    #[test]
    fn test_insert_and_delete_chars() {
        let mut buf = buffer(10, 3);
        buf.write_str("abcdef");
        buf.set_position(2, 0);
        buf.insert_blank_characters(2);
        assert_eq!(buf.line(0).unwrap().text(), "ab  cdef");
        buf.delete_chars(2);
        assert_eq!(buf.line(0).unwrap().text(), "abcdef");
    }

    #[test]
    fn test_erase_characters_in_place() {
        let mut buf = buffer(10, 3);
        buf.write_str("abcdef");
        buf.set_position(1, 0);
        buf.erase_characters(3);
        assert_eq!(buf.line(0).unwrap().text(), "a   ef");
    }

    #[test]
    fn test_erase_line_from_cursor_pads_to_width() {
        let mut buf = buffer(6, 3);
        buf.write_str("abcdef");
        buf.set_position(3, 0);
        buf.erase_line_from_cursor();
        let line = buf.line(0).unwrap();
        assert_eq!(line.text(), "abc   ");
        assert_eq!(line.len(), 6);
        // cursor untouched by the erase
        assert_eq!(buf.cursor_column(), 3);
    }

    #[test]
    fn test_scroll_offset_clamps() {
        let mut buf = buffer(4, 3);
        for i in 0..6 {
            buf.write_str(&i.to_string());
            buf.new_line();
        }
        let max = buf.height() - buf.view_height();
        buf.scroll_up(100);
        assert_eq!(buf.scroll_offset(), max);
        buf.scroll_down(1);
        assert_eq!(buf.scroll_offset(), max - 1);
        buf.scroll_to_end();
        assert_eq!(buf.scroll_offset(), 0);
    }

    #[test]
    fn test_write_resets_scroll_offset() {
        let mut buf = buffer(4, 3);
        for i in 0..6 {
            buf.write_str(&i.to_string());
            buf.new_line();
        }
        buf.scroll_up(2);
        assert!(buf.scroll_offset() > 0);
        buf.write_str("x");
        assert_eq!(buf.scroll_offset(), 0);
    }

    #[test]
    fn test_resize_rejects_zero() {
        let mut buf = buffer(10, 5);
        buf.write_str("hello");
        assert!(buf.resize_view(0, 5).is_err());
        assert_eq!(buf.view_width(), 10);
        assert_eq!(buf.line(0).unwrap().text(), "hello");
    }

    #[test]
    fn test_resize_narrower_wraps() {
        let mut buf = buffer(10, 5);
        buf.write_str("abcdefgh");
        buf.resize_view(5, 5).unwrap();
        assert_eq!(buf.line(0).unwrap().text(), "abcde");
        assert_eq!(buf.line(1).unwrap().text(), "fgh");
        assert!(buf.line(1).unwrap().is_wrapped());
    }

    #[test]
    fn test_resize_wider_unwraps() {
        let mut buf = buffer(5, 5);
        buf.write_str("abcdefgh");
        assert_eq!(buf.height(), 2);
        buf.resize_view(10, 5).unwrap();
        assert_eq!(buf.height(), 1);
        assert_eq!(buf.line(0).unwrap().text(), "abcdefgh");
    }

    #[test]
    fn test_resize_round_trip_preserves_text() {
        let mut buf = buffer(8, 4);
        buf.write_str("one two");
        buf.new_line();
        buf.write_str("three");
        buf.resize_view(3, 4).unwrap();
        buf.resize_view(8, 4).unwrap();
        let joined: Vec<String> = (0..buf.height())
            .filter_map(|i| buf.line(i).map(|l| l.text()))
            .collect();
        assert!(joined.contains(&"one two".to_string()));
        assert!(joined.contains(&"three".to_string()));
    }

    #[test]
    fn test_resize_resets_margins() {
        let mut buf = buffer(10, 6);
        buf.set_vertical_margins(1, 4);
        buf.resize_view(10, 8).unwrap();
        assert_eq!(buf.top_margin(), 0);
        assert_eq!(buf.bottom_margin(), 7);
    }

    #[test]
    fn test_dirty_read_and_clear() {
        let mut buf = buffer(10, 5);
        assert!(!buf.is_dirty());
        buf.write_str("x");
        assert!(buf.is_dirty());
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_save_restore_cursor() {
        let mut buf = buffer(10, 5);
        buf.set_position(4, 2);
        buf.save_cursor();
        buf.set_position(0, 0);
        buf.restore_cursor();
        assert_eq!(buf.cursor_column(), 4);
        assert_eq!(buf.cursor_row(), 2);
    }

    #[test]
    fn test_margin_clamp() {
        let mut buf = buffer(10, 5);
        buf.set_vertical_margins(4, 2);
        assert!(buf.top_margin() <= buf.bottom_margin());
        assert!(buf.bottom_margin() < buf.view_height());
    }

    #[test]
    fn test_from_config() {
        let buf = Buffer::from_config(&crate::config::Config::default()).unwrap();
        assert_eq!(buf.view_width(), 80);
        assert_eq!(buf.view_height(), 24);
    }

    #[test]
    fn test_clear_scrolls_screen_away() {
        let mut buf = buffer(10, 3);
        buf.write_str("hello");
        buf.clear();
        assert!(view_text(&buf).iter().all(|t| t.trim().is_empty()));
        assert_eq!(buf.cursor_column(), 0);
        assert_eq!(buf.cursor_row(), 0);
    }
}
