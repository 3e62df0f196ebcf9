use crate::rect::Rect;
use crate::text::char_width;

use super::{Brush, Cell};

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Paint the background of every cell in `area` and blank its symbols.
    pub fn fill(&mut self, area: Rect, brush: Brush) {
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                self.set(x, y, brush.cell(' '));
            }
        }
    }

    /// Write `text` starting at `(x, y)` without crossing `x + max_width`.
    ///
    /// Returns the number of columns written. A double-width symbol that
    /// would straddle the limit is dropped.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, max_width: u16, brush: Brush) -> u16 {
        if y >= self.height {
            return 0;
        }
        let limit = x.saturating_add(max_width).min(self.width);
        let mut cursor = x;
        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if cursor + w > limit {
                break;
            }
            self.set(cursor, y, brush.cell(ch));
            if w == 2 {
                let mut cont = brush.cell(' ');
                cont.continuation = true;
                self.set(cursor + 1, y, cont);
            }
            cursor += w;
        }
        cursor - x
    }

    /// Text of row `y`, skipping continuation cells.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.continuation)
            .map(|c| c.symbol)
            .collect()
    }

    /// Cells that differ from `other`, with their coordinates.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y as usize) * (self.width as usize) + (x as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Rgb, TextStyle};

    fn brush() -> Brush {
        Brush {
            fg: Rgb::new(1, 2, 3),
            bg: Rgb::new(4, 5, 6),
            text: TextStyle::new(),
        }
    }

    #[test]
    fn put_str_clips_at_limit() {
        let mut buf = Buffer::new(10, 1);
        let written = buf.put_str(2, 0, "abcdef", 3, brush());
        assert_eq!(written, 3);
        assert_eq!(buf.row_text(0), "  abc     ");
    }

    #[test]
    fn wide_chars_mark_continuation() {
        let mut buf = Buffer::new(4, 1);
        buf.put_str(0, 0, "日x", 4, brush());
        assert!(buf.get(1, 0).is_some_and(|c| c.continuation));
        assert_eq!(buf.row_text(0), "日x ");
    }

    #[test]
    fn wide_char_at_edge_is_dropped() {
        let mut buf = Buffer::new(3, 1);
        let written = buf.put_str(0, 0, "a日", 2, brush());
        assert_eq!(written, 1);
    }

    #[test]
    fn diff_reports_changed_cells_only() {
        let a = Buffer::new(3, 2);
        let mut b = Buffer::new(3, 2);
        b.put_str(1, 1, "z", 1, brush());
        let changed: Vec<_> = b.diff(&a).map(|(x, y, _)| (x, y)).collect();
        assert_eq!(changed, vec![(1, 1)]);
    }
}
