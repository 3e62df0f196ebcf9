use crate::style::{Rgb, TextStyle};

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub text: TextStyle,
    /// Second column of a double-width symbol stored in the cell to the left.
    pub continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            text: TextStyle::new(),
            continuation: false,
        }
    }
}

/// Fully resolved colors and attributes used when writing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub fg: Rgb,
    pub bg: Rgb,
    pub text: TextStyle,
}

impl Brush {
    pub fn cell(&self, symbol: char) -> Cell {
        Cell {
            symbol,
            fg: self.fg,
            bg: self.bg,
            text: self.text,
            continuation: false,
        }
    }
}
