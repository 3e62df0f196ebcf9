//! Column definitions.

use std::fmt;

use crate::cell::{CellRenderer, default_cell};
use crate::span::Span;
use crate::style::Style;
use crate::value::{CellValue, FieldPath, Record};

/// Horizontal alignment for header and cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// How much horizontal space a column asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnWidth {
    /// Share whatever is left after fixed and percentage columns.
    #[default]
    Auto,
    /// Exact width in terminal columns.
    Fixed(u16),
    /// Percentage of the width available to data columns.
    Percent(u16),
}

/// One table column: a header, the field it reads and how its cells render.
///
/// Several columns may share a key (for example an actions column with no
/// real field behind it); columns are identified by position, not key.
///
/// ```ignore
/// let columns = vec![
///     Column::new("Name", "user.name").sortable(),
///     Column::new("Joined", "createdAt").width(ColumnWidth::Fixed(12)),
///     Column::new("", "actions").clickable().stop_propagation(),
/// ];
/// ```
pub struct Column<T> {
    header: Span,
    key: FieldPath,
    sortable: bool,
    renderer: Option<Box<dyn CellRenderer<T>>>,
    width: ColumnWidth,
    align: Alignment,
    sticky: bool,
    style: Style,
    clickable: bool,
    stop_propagation: bool,
}

impl<T> Column<T> {
    pub fn new(header: impl Into<Span>, key: impl Into<FieldPath>) -> Self {
        Self {
            header: header.into(),
            key: key.into(),
            sortable: false,
            renderer: None,
            width: ColumnWidth::Auto,
            align: Alignment::Left,
            sticky: false,
            style: Style::new(),
            clickable: false,
            stop_propagation: false,
        }
    }

    /// Allow header clicks on this column to sort (when the table is sortable).
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn render(mut self, renderer: impl CellRenderer<T> + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    /// Extra style layered over this column's header.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Clicks on this column's cells produce a cell-click event.
    pub fn clickable(mut self) -> Self {
        self.clickable = true;
        self
    }

    /// Clicks on this column's cells never count as a row click.
    pub fn stop_propagation(mut self) -> Self {
        self.stop_propagation = true;
        self
    }

    pub fn header(&self) -> &Span {
        &self.header
    }

    pub fn key(&self) -> &FieldPath {
        &self.key
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn width_hint(&self) -> ColumnWidth {
        self.width
    }

    pub fn alignment(&self) -> Alignment {
        self.align
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub fn header_style(&self) -> Style {
        self.style
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    pub fn stops_propagation(&self) -> bool {
        self.stop_propagation
    }
}

impl<T: Record> Column<T> {
    pub fn value_of(&self, row: &T) -> CellValue {
        row.field(&self.key)
    }

    pub fn render_cell(&self, row: &T, index: usize) -> Span {
        let value = self.value_of(row);
        match &self.renderer {
            Some(renderer) => renderer.render(&value, row, index),
            None => default_cell(&value),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header.text)
            .field("key", &self.key)
            .field("sortable", &self.sortable)
            .field("custom_renderer", &self.renderer.is_some())
            .field("width", &self.width)
            .field("align", &self.align)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_rendering_reads_nested_key() {
        let column: Column<serde_json::Value> = Column::new("Actor", "actor.name");
        let row = json!({ "actor": { "name": "Grace" } });
        assert_eq!(column.render_cell(&row, 0).text, "Grace");
    }

    #[test]
    fn custom_renderer_receives_row_and_index() {
        let column: Column<serde_json::Value> =
            Column::new("Name", "name").render(|value: &CellValue, _row: &serde_json::Value, index: usize| {
                Span::new(format!("{index}:{}", value.coerce_string()))
            });
        let row = json!({ "name": "Linus" });
        assert_eq!(column.render_cell(&row, 4).text, "4:Linus");
    }
}
