use super::events::RowTarget;
use super::view::{RowView, TableBody, TableView};
use crate::buffer::{Brush, Buffer};
use crate::column::{Alignment, ColumnWidth};
use crate::rect::Rect;
use crate::skeleton::SkeletonRow;
use crate::span::Span;
use crate::style::{Role, Style, Theme};
use crate::text::{display_width, fit};

/// Width of the checkbox column, `[x]` plus a gutter.
pub const SELECT_COLUMN_WIDTH: u16 = 4;

const BUSY_GLYPH: &str = "◌";

/// What a terminal coordinate maps to inside a rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableHit {
    Header(usize),
    SelectAll,
    Row { position: usize, target: RowTarget },
}

/// Geometry of the last render, used to map clicks back to the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableLayout {
    area: Rect,
    header_y: Option<u16>,
    select_x: Option<(u16, u16)>,
    columns: Vec<(u16, u16)>,
    rows: Vec<(u16, usize)>,
    scroll: usize,
}

impl TableLayout {
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Number of body rows that fit on screen.
    pub fn visible_rows(&self) -> usize {
        self.rows.len()
    }

    /// First row drawn in the last render.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<TableHit> {
        if !self.area.contains(x, y) {
            return None;
        }
        let in_select = self.select_x.is_some_and(|(start, width)| x >= start && x < start + width);
        let column = self
            .columns
            .iter()
            .position(|&(start, width)| x >= start && x < start + width);

        if self.header_y == Some(y) {
            if in_select {
                return Some(TableHit::SelectAll);
            }
            return column.map(TableHit::Header);
        }

        let &(_, position) = self.rows.iter().find(|(row_y, _)| *row_y == y)?;
        let target = if in_select {
            RowTarget::Checkbox
        } else {
            column.map_or(RowTarget::Row, RowTarget::Cell)
        };
        Some(TableHit::Row { position, target })
    }
}

/// Split `available` columns between width hints.
///
/// Fixed widths are honored first, percentages take a share of `available`,
/// and auto columns split what is left evenly. Nothing exceeds `available`.
pub fn resolve_widths(hints: &[ColumnWidth], available: u16) -> Vec<u16> {
    let mut remaining = available;
    let mut widths = vec![0u16; hints.len()];

    for (i, hint) in hints.iter().enumerate() {
        if let ColumnWidth::Fixed(w) = hint {
            widths[i] = (*w).min(remaining);
            remaining -= widths[i];
        }
    }
    for (i, hint) in hints.iter().enumerate() {
        if let ColumnWidth::Percent(p) = hint {
            let share = (u32::from(available) * u32::from((*p).min(100)) / 100) as u16;
            widths[i] = share.min(remaining);
            remaining -= widths[i];
        }
    }

    let autos: Vec<usize> = hints
        .iter()
        .enumerate()
        .filter(|(_, h)| matches!(h, ColumnWidth::Auto))
        .map(|(i, _)| i)
        .collect();
    if !autos.is_empty() {
        let count = autos.len() as u16;
        let share = remaining / count;
        let mut extra = remaining % count;
        for i in autos {
            widths[i] = share + u16::from(extra > 0);
            extra = extra.saturating_sub(1);
        }
    }
    widths
}

/// First row to draw so that `cursor` falls inside a window of `capacity` rows.
///
/// Starts from `offset`, moves the least needed to reveal the cursor and never
/// leaves blank lines below the last row.
pub fn scroll_offset(offset: usize, cursor: Option<usize>, capacity: usize, rows: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    let mut offset = offset;
    if let Some(cursor) = cursor.filter(|&c| c < rows) {
        if cursor < offset {
            offset = cursor;
        } else if cursor >= offset + capacity {
            offset = cursor + 1 - capacity;
        }
    }
    offset.min(rows.saturating_sub(capacity))
}

/// Draw `view` into `area` and return the layout for hit testing.
pub fn render_table(view: &TableView, area: Rect, buf: &mut Buffer, theme: &Theme) -> TableLayout {
    let base = theme.brush(&Style::new());
    buf.fill(area, base);

    let inner = if view.bordered {
        draw_border(buf, area, theme.brush(&Style::new().fg(Role::Border)));
        area.inset(1)
    } else {
        area
    };
    let mut layout = TableLayout {
        area: inner,
        ..TableLayout::default()
    };
    if inner.is_empty() {
        return layout;
    }

    let select_width = if view.has_selection_column() {
        SELECT_COLUMN_WIDTH.min(inner.width)
    } else {
        0
    };
    if select_width > 0 {
        layout.select_x = Some((inner.x, select_width));
    }

    let hints: Vec<ColumnWidth> = view.header.iter().map(|h| h.width).collect();
    let widths = resolve_widths(&hints, inner.width - select_width);
    let mut x = inner.x + select_width;
    for width in widths {
        layout.columns.push((x, width));
        x += width;
    }

    // header
    let mut y = inner.y;
    layout.header_y = Some(y);
    let header_base = Style::new().fg(Role::Header).bold();
    if let Some(state) = view.select_all {
        let style = if view.selectable {
            header_base
        } else {
            Style::new().fg(Role::Muted).dim()
        };
        buf.put_str(inner.x, y, state.glyph(), select_width, theme.brush(&style));
    }
    for (cell, &(cx, width)) in view.header.iter().zip(&layout.columns) {
        let brush = theme.brush(&header_base.patch(cell.style));
        match cell.indicator {
            Some(indicator) => {
                let glyph = indicator.span();
                let label_width = content_width(width).saturating_sub(glyph.width() as u16 + 1);
                let label = fit(&cell.label.text, label_width as usize, cell.align);
                let written = buf.put_str(cx, y, &label, label_width, brush);
                let glyph_brush = theme.brush(&header_base.patch(glyph.style));
                buf.put_str(cx + written + 1, y, &glyph.text, width.saturating_sub(written + 1), glyph_brush);
            }
            None => {
                let w = content_width(width);
                let label = fit(&cell.label.text, w as usize, cell.align);
                buf.put_str(cx, y, &label, w, brush);
            }
        }
    }
    y += 1;

    if !view.compact && y < inner.bottom() {
        draw_rule(buf, inner.x, y, inner.width, theme.brush(&Style::new().fg(Role::Border)));
        y += 1;
    }

    match &view.body {
        TableBody::Skeleton { rows } => {
            for _ in 0..*rows {
                if y >= inner.bottom() {
                    break;
                }
                if select_width > 0 {
                    draw_span(buf, inner.x, y, select_width, &SkeletonRow::bar(select_width), base, theme);
                }
                for &(cx, width) in &layout.columns {
                    draw_span(buf, cx, y, width, &SkeletonRow::bar(width), base, theme);
                }
                y += 1;
            }
        }
        TableBody::Empty { .. } => {
            let span = view.body.empty_span().filter(|_| y < inner.bottom());
            if let Some(span) = span {
                let text = fit(&span.text, inner.width as usize, Alignment::Center);
                buf.put_str(inner.x, y, &text, inner.width, theme.brush(&span.style));
            }
        }
        TableBody::Rows(rows) => {
            let lines = usize::from(inner.bottom().saturating_sub(y));
            let capacity = if view.divider { lines.div_ceil(2) } else { lines };
            layout.scroll = scroll_offset(view.scroll, view.cursor, capacity, rows.len());
            for (drawn, row) in rows.iter().skip(layout.scroll).enumerate() {
                if y >= inner.bottom() {
                    break;
                }
                if view.divider && drawn > 0 {
                    draw_rule(buf, inner.x, y, inner.width, theme.brush(&Style::new().fg(Role::Border).dim()));
                    y += 1;
                    if y >= inner.bottom() {
                        break;
                    }
                }
                draw_row(buf, view, row, inner, y, select_width, &layout.columns, theme);
                layout.rows.push((y, row.position));
                y += 1;
            }
        }
    }

    layout
}

#[allow(clippy::too_many_arguments)]
fn draw_row(
    buf: &mut Buffer,
    view: &TableView,
    row: &RowView,
    inner: Rect,
    y: u16,
    select_width: u16,
    columns: &[(u16, u16)],
    theme: &Theme,
) {
    let background = if view.cursor == Some(row.position) {
        Some(Role::Cursor)
    } else if row.selected == Some(true) {
        Some(Role::Selection)
    } else if view.striped && row.position % 2 == 1 {
        Some(Role::Stripe)
    } else {
        None
    };
    let row_style = background.map_or(Style::new(), |role| Style::new().bg(role));
    let row_brush = theme.brush(&row_style);
    buf.fill(Rect::new(inner.x, y, inner.width, 1), row_brush);

    if select_width > 0 {
        let span = if row.busy {
            Span::styled(BUSY_GLYPH, Style::new().fg(Role::Primary))
        } else {
            let glyph = match row.selected {
                Some(true) => "[x]",
                _ => "[ ]",
            };
            let style = if view.selectable {
                Style::new()
            } else {
                Style::new().fg(Role::Muted).dim()
            };
            Span::styled(glyph, style)
        };
        draw_span(buf, inner.x, y, select_width, &span, row_brush, theme);
    }

    for ((span, &(cx, width)), header) in row.cells.iter().zip(columns).zip(&view.header) {
        let w = content_width(width);
        let text = fit(&span.text, w as usize, header.align);
        let style = row_style.patch(span.style);
        buf.put_str(cx, y, &text, w, theme.brush(&style));
    }
}

/// Columns usable for content: one is kept as a gutter when there is room.
fn content_width(width: u16) -> u16 {
    if width > 1 { width - 1 } else { width }
}

fn draw_span(buf: &mut Buffer, x: u16, y: u16, width: u16, span: &Span, base: Brush, theme: &Theme) {
    let mut brush = theme.brush(&span.style);
    if span.style.bg.is_none() {
        brush.bg = base.bg;
    }
    let w = (display_width(&span.text) as u16).min(width);
    buf.put_str(x, y, &span.text, w, brush);
}

fn draw_rule(buf: &mut Buffer, x: u16, y: u16, width: u16, brush: Brush) {
    for dx in 0..width {
        buf.set(x + dx, y, brush.cell('─'));
    }
}

fn draw_border(buf: &mut Buffer, area: Rect, brush: Brush) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let (left, top) = (area.x, area.y);
    let (right, bottom) = (area.right() - 1, area.bottom() - 1);
    for x in left + 1..right {
        buf.set(x, top, brush.cell('─'));
        buf.set(x, bottom, brush.cell('─'));
    }
    for y in top + 1..bottom {
        buf.set(left, y, brush.cell('│'));
        buf.set(right, y, brush.cell('│'));
    }
    buf.set(left, top, brush.cell('┌'));
    buf.set(right, top, brush.cell('┐'));
    buf.set(left, bottom, brush.cell('└'));
    buf.set(right, bottom, brush.cell('┘'));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_fixed_then_percent_then_auto() {
        let hints = [ColumnWidth::Fixed(10), ColumnWidth::Percent(50), ColumnWidth::Auto, ColumnWidth::Auto];
        assert_eq!(resolve_widths(&hints, 41), vec![10, 20, 6, 5]);
    }

    #[test]
    fn widths_never_exceed_available() {
        let hints = [ColumnWidth::Fixed(30), ColumnWidth::Fixed(30), ColumnWidth::Auto];
        let widths = resolve_widths(&hints, 40);
        assert_eq!(widths, vec![30, 10, 0]);
        assert_eq!(widths.iter().sum::<u16>(), 40);
    }

    #[test]
    fn scroll_follows_cursor_both_ways() {
        assert_eq!(scroll_offset(0, Some(20), 10, 25), 11);
        assert_eq!(scroll_offset(11, Some(15), 10, 25), 11);
        assert_eq!(scroll_offset(11, Some(3), 10, 25), 3);
        assert_eq!(scroll_offset(0, None, 10, 25), 0);
    }

    #[test]
    fn scroll_is_clamped_to_the_last_full_window() {
        assert_eq!(scroll_offset(20, None, 10, 25), 15);
        assert_eq!(scroll_offset(4, Some(2), 10, 5), 0);
        assert_eq!(scroll_offset(7, Some(3), 0, 25), 0);
    }

    #[test]
    fn layout_hit_maps_header_and_rows() {
        let layout = TableLayout {
            area: Rect::new(0, 0, 20, 5),
            header_y: Some(0),
            select_x: Some((0, 4)),
            columns: vec![(4, 8), (12, 8)],
            rows: vec![(2, 0), (3, 1)],
            scroll: 0,
        };
        assert_eq!(layout.hit(1, 0), Some(TableHit::SelectAll));
        assert_eq!(layout.hit(13, 0), Some(TableHit::Header(1)));
        assert_eq!(
            layout.hit(0, 3),
            Some(TableHit::Row { position: 1, target: RowTarget::Checkbox })
        );
        assert_eq!(
            layout.hit(5, 2),
            Some(TableHit::Row { position: 0, target: RowTarget::Cell(0) })
        );
        assert_eq!(layout.hit(5, 1), None);
        assert_eq!(layout.hit(25, 2), None);
    }
}
