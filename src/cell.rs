//! Terminal cell representation
//!
//! A cell is a single position in the grid: one base character plus the
//! styling attributes it was written with. A character of `'\0'` means the
//! cell is blank.

use serde::{Deserialize, Serialize};

/// Color representation supporting indexed and RGB colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    /// Default terminal color (foreground or background)
    #[default]
    Default,
    /// Standard 256-color palette index
    Indexed(u8),
    /// 24-bit RGB color
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Color = Color::Indexed(0);
    pub const RED: Color = Color::Indexed(1);
    pub const GREEN: Color = Color::Indexed(2);
    pub const YELLOW: Color = Color::Indexed(3);
    pub const BLUE: Color = Color::Indexed(4);
    pub const MAGENTA: Color = Color::Indexed(5);
    pub const CYAN: Color = Color::Indexed(6);
    pub const WHITE: Color = Color::Indexed(7);
}

/// Style attributes applied to a cell when it is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellAttributes {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub blink: bool,
    /// Swap foreground and background when rendering
    pub reverse: bool,
    pub hidden: bool,
    pub strikethrough: bool,
}

impl CellAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all attributes to default (SGR 0)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A single cell in the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    c: char,
    attr: CellAttributes,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            c: '\0',
            attr: CellAttributes::default(),
        }
    }
}

impl Cell {
    /// Create a blank cell carrying the given attributes
    pub fn blank(attr: CellAttributes) -> Self {
        Cell { c: '\0', attr }
    }

    /// Create a cell with a character and attributes
    pub fn with_attrs(c: char, attr: CellAttributes) -> Self {
        Cell { c, attr }
    }

    /// The base character. `'\0'` means the cell is blank.
    pub fn ch(&self) -> char {
        self.c
    }

    pub fn set_ch(&mut self, c: char) {
        self.c = c;
    }

    pub fn attributes(&self) -> &CellAttributes {
        &self.attr
    }

    pub fn set_attributes(&mut self, attr: CellAttributes) {
        self.attr = attr;
    }

    /// Check if this cell is blank
    pub fn is_blank(&self) -> bool {
        self.c == '\0'
    }

    /// Effective foreground color, honouring the reverse flag
    pub fn fg(&self) -> Color {
        if self.attr.reverse {
            self.attr.bg
        } else {
            self.attr.fg
        }
    }

    /// Effective background color, honouring the reverse flag
    pub fn bg(&self) -> Color {
        if self.attr.reverse {
            self.attr.fg
        } else {
            self.attr.bg
        }
    }

    /// Erase the cell: blank the character, keep only the supplied
    /// background color, reset every other attribute.
    pub fn erase(&mut self, bg: Color) {
        self.c = '\0';
        self.attr = CellAttributes {
            bg,
            ..CellAttributes::default()
        };
    }
}
