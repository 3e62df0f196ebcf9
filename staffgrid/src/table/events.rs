use log::debug;

use super::state::{DataTable, TableProps};
use crate::selection::SelectionMap;
use crate::sort::SortOrder;
use crate::value::Record;

/// Part of a body row an interaction landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    /// The row as a whole, e.g. keyboard activation.
    Row,
    Checkbox,
    /// A data cell by column index.
    Cell(usize),
}

/// Requests the table hands back to its owner.
///
/// `index` always refers to the row's position in the `data` slice passed in
/// props; `position` is where the row was drawn after sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    Sort { key: String, order: SortOrder },
    SelectRow { index: usize, key: String, selected: bool },
    /// Toggle every row of the current page.
    SelectAll { selected: bool },
    RowClick { index: usize, position: usize },
    CellClick { index: usize, position: usize, column: usize },
}

impl<T: Record> DataTable<T> {
    /// Header click on column `col`.
    ///
    /// Returns `None` when sorting is off globally or for that column.
    pub fn header_click(&mut self, col: usize) -> Option<TableEvent> {
        if !self.config.sortable {
            return None;
        }
        let column = self.columns.get(col)?;
        if !column.is_sortable() {
            return None;
        }
        let key = column.key().as_str().to_string();
        let order = self.sort.click(&key);
        debug!("sort {} {}", key, order);
        Some(TableEvent::Sort { key, order })
    }

    /// Header checkbox click. `None` when nothing on the page can be selected.
    pub fn select_all_click(&self, props: &TableProps<'_, T>) -> Option<TableEvent> {
        if !self.config.selection || self.row_key.is_none() || props.loading || props.data.is_empty() {
            return None;
        }
        let state = self.select_all_state(props);
        Some(TableEvent::SelectAll {
            selected: !state.checked,
        })
    }

    /// Click on the body row drawn at `position`.
    pub fn row_click(&self, props: &TableProps<'_, T>, position: usize, target: RowTarget) -> Vec<TableEvent> {
        if props.loading {
            return Vec::new();
        }
        let order = self.row_order(props.data);
        let Some(&index) = order.get(position) else {
            return Vec::new();
        };
        let row = &props.data[index];

        match target {
            RowTarget::Checkbox => {
                if !self.config.selection {
                    return Vec::new();
                }
                let Some(key) = self.key_of(row, index) else {
                    return Vec::new();
                };
                let selected = !self.is_selected(props, Some(&key));
                vec![TableEvent::SelectRow { index, key, selected }]
            }
            RowTarget::Row => vec![TableEvent::RowClick { index, position }],
            RowTarget::Cell(column) => {
                let Some(col) = self.columns.get(column) else {
                    return vec![TableEvent::RowClick { index, position }];
                };
                let mut events = Vec::new();
                if col.is_clickable() {
                    events.push(TableEvent::CellClick { index, position, column });
                }
                if !col.stops_propagation() {
                    events.push(TableEvent::RowClick { index, position });
                }
                events
            }
        }
    }
}

impl<T: Record + Clone> DataTable<T> {
    /// Apply a selection event to a caller-owned map.
    ///
    /// Select-all touches only the rows of `data`; keys from other pages stay.
    /// Returns the number of entries that changed.
    pub fn apply_selection(&self, event: &TableEvent, data: &[T], selection: &mut SelectionMap<T>) -> usize {
        match event {
            TableEvent::SelectRow { index, key, selected } => {
                let Some(row) = data.get(*index) else {
                    return 0;
                };
                let had = selection.contains(key);
                selection.set(key, row, *selected);
                usize::from(had != *selected)
            }
            TableEvent::SelectAll { selected } => {
                let Some(keyed) = self.keyed_rows(data) else {
                    return 0;
                };
                let changed = selection.apply_page(keyed, *selected);
                debug!("select all {}: {} changed", selected, changed);
                changed
            }
            _ => 0,
        }
    }
}
