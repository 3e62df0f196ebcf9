use super::state::{DataTable, TableProps};
use crate::column::{Alignment, ColumnWidth};
use crate::indicator::SortIndicator;
use crate::selection::SelectAllState;
use crate::span::Span;
use crate::style::Style;
use crate::value::Record;

/// Glyph leading the empty-state message.
pub const EMPTY_GLYPH: &str = "∅";

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub label: Span,
    /// Present only for columns that can currently be sorted.
    pub indicator: Option<SortIndicator>,
    pub width: ColumnWidth,
    pub align: Alignment,
    pub sticky: bool,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Index into the `data` slice.
    pub index: usize,
    /// Rendered position after sorting.
    pub position: usize,
    pub key: Option<String>,
    pub cells: Vec<Span>,
    /// `None` when the table has no selection column.
    pub selected: Option<bool>,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Skeleton { rows: usize },
    Empty { message: String },
    Rows(Vec<RowView>),
}

impl TableBody {
    /// Number of body lines the body occupies, excluding dividers.
    pub fn line_count(&self) -> usize {
        match self {
            TableBody::Skeleton { rows } => *rows,
            TableBody::Empty { .. } => 1,
            TableBody::Rows(rows) => rows.len(),
        }
    }

    pub fn rows(&self) -> &[RowView] {
        match self {
            TableBody::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn empty_span(&self) -> Option<Span> {
        match self {
            TableBody::Empty { message } => Some(Span::muted(format!("{} {}", EMPTY_GLYPH, message))),
            _ => None,
        }
    }
}

/// Everything [`crate::render_table`] needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub header: Vec<HeaderCell>,
    /// `None` when the table has no selection column.
    pub select_all: Option<SelectAllState>,
    /// Whether checkboxes can be toggled. False without a row key.
    pub selectable: bool,
    pub body: TableBody,
    /// Highlighted rendered row.
    pub cursor: Option<usize>,
    /// First rendered row to draw. The renderer adjusts it to keep the cursor in view.
    pub scroll: usize,
    pub striped: bool,
    pub bordered: bool,
    pub compact: bool,
    pub divider: bool,
}

impl TableView {
    pub fn with_cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Start drawing at `offset`, usually [`crate::TableLayout::scroll`] from the previous frame.
    pub fn with_scroll(mut self, offset: usize) -> Self {
        self.scroll = offset;
        self
    }

    pub fn has_selection_column(&self) -> bool {
        self.select_all.is_some()
    }

    /// Rendered row at `position`.
    pub fn row(&self, position: usize) -> Option<&RowView> {
        self.body.rows().get(position)
    }
}

impl<T: Record> DataTable<T> {
    /// Project props into a renderable view: skeleton while loading, the empty
    /// row when there is nothing to show, otherwise rows in sort order.
    pub fn view(&self, props: &TableProps<'_, T>) -> TableView {
        let header = self
            .columns
            .iter()
            .map(|column| {
                let key = column.key().as_str();
                HeaderCell {
                    label: column.header().clone(),
                    indicator: (self.config.sortable && column.is_sortable())
                        .then(|| SortIndicator::for_column(key, &self.sort)),
                    width: column.width_hint(),
                    align: column.alignment(),
                    sticky: column.is_sticky(),
                    style: column.header_style(),
                }
            })
            .collect();

        let selectable = self.config.selection && self.row_key.is_some();
        let select_all = self.config.selection.then(|| self.select_all_state(props));

        let body = if props.loading {
            TableBody::Skeleton {
                rows: self.config.skeleton_rows,
            }
        } else if props.data.is_empty() {
            TableBody::Empty {
                message: self.config.empty_message.clone(),
            }
        } else {
            let rows = self
                .row_order(props.data)
                .into_iter()
                .enumerate()
                .map(|(position, index)| {
                    let row = &props.data[index];
                    let key = self.key_of(row, index);
                    let selected = self
                        .config
                        .selection
                        .then(|| self.is_selected(props, key.as_deref()));
                    let busy = match (key.as_deref(), props.busy) {
                        (Some(key), Some(busy)) => busy.is_loading(key),
                        _ => false,
                    };
                    RowView {
                        index,
                        position,
                        cells: self.columns.iter().map(|c| c.render_cell(row, position)).collect(),
                        key,
                        selected,
                        busy,
                    }
                })
                .collect();
            TableBody::Rows(rows)
        };

        TableView {
            header,
            select_all,
            selectable,
            body,
            cursor: None,
            scroll: 0,
            striped: self.config.striped,
            bordered: self.config.bordered,
            compact: self.config.compact,
            divider: self.config.divider,
        }
    }
}
