//! Placeholder rows shown while a page is loading.

use crate::span::Span;

pub const SKELETON_GLYPH: char = '░';

/// A loading placeholder with one bar per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkeletonRow {
    cells: usize,
}

impl SkeletonRow {
    pub fn for_columns(cells: usize) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    /// The bar drawn inside a cell of `width` columns; one column is left as a gutter.
    pub fn bar(width: u16) -> Span {
        let len = width.saturating_sub(1).max(1) as usize;
        Span::muted(SKELETON_GLYPH.to_string().repeat(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_leaves_gutter() {
        assert_eq!(SkeletonRow::bar(4).text, "░░░");
        assert_eq!(SkeletonRow::bar(0).text, "░");
    }
}
