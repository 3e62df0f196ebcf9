//! The data table.
//!
//! A [`DataTable`] holds column definitions, presentation options and its own
//! sort state. Everything else arrives per render through [`TableProps`]:
//! the current page of rows, the loading flag, the caller-owned selection.
//!
//! - [`DataTable::view`] turns props into a [`TableView`]
//! - [`render_table`] draws a view and returns a [`TableLayout`] for hit testing
//! - [`DataTable::header_click`], [`DataTable::select_all_click`] and
//!   [`DataTable::row_click`] translate interactions into [`TableEvent`]s
//!
//! ```ignore
//! let mut table = DataTable::new(columns)?
//!     .sortable(true)
//!     .row_key(|member: &Member, _| member.id.clone())
//!     .selection(true);
//!
//! let props = TableProps::new(&page).selection(&selected);
//! let layout = render_table(&table.view(&props), area, &mut buffer, &theme);
//! ```

mod events;
mod render;
mod state;
mod view;

pub use events::{RowTarget, TableEvent};
pub use render::{SELECT_COLUMN_WIDTH, TableHit, TableLayout, render_table, resolve_widths};
pub use state::{DataTable, RowKeyFn, TableConfig, TableProps};
pub use view::{HeaderCell, RowView, TableBody, TableView};
