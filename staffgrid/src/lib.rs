//! Terminal data-table widgets.
//!
//! `staffgrid` renders tabular pages of records into a cell [`Buffer`] which a
//! crossterm [`Terminal`] flushes to the screen. The [`DataTable`] never fetches
//! or owns data: callers hand it a page of rows on every render and react to
//! the [`TableEvent`]s it returns.

pub mod buffer;
pub mod bulk;
pub mod cell;
pub mod column;
pub mod combobox;
pub mod error;
pub mod event;
pub mod indicator;
pub mod pagination;
pub mod rect;
pub mod row_loading;
pub mod search;
pub mod selection;
pub mod skeleton;
pub mod sort;
pub mod span;
pub mod style;
pub mod table;
pub mod terminal;
pub mod text;
pub mod value;

pub use buffer::{Brush, Buffer, Cell};
pub use bulk::{ActionVariant, BulkAction, BulkActionsBar, BulkEvent, BulkHit, BulkLayout, render_bulk_bar};
pub use cell::{CellRenderer, DefaultRenderer, PLACEHOLDER};
pub use column::{Alignment, Column, ColumnWidth};
pub use combobox::{
    Choice, Combobox, ComboboxEvent, ComboboxOptions, ResultsStatus, SelectionMode, filter_local,
    render_combobox,
};
pub use error::{GridError, Result};
pub use event::{Input, Key, Modifiers};
pub use indicator::SortIndicator;
pub use pagination::{
    PageControl, Pagination, PaginationEvent, PaginationLayout, RowsPerPageOption, render_pagination,
};
pub use rect::Rect;
pub use row_loading::RowLoading;
pub use search::DebouncedSearch;
pub use selection::{SelectAllState, SelectionMap};
pub use skeleton::SkeletonRow;
pub use sort::{DelegatedSort, LocalSort, SortOrder, SortPhase, SortState, SortingStrategy};
pub use span::Span;
pub use style::{Paint, Rgb, Role, Style, TextStyle, Theme};
pub use table::{
    DataTable, HeaderCell, RowKeyFn, RowTarget, RowView, TableBody, TableConfig, TableEvent,
    TableHit, TableLayout, TableProps, TableView, render_table,
};
pub use terminal::Terminal;
pub use value::{CellValue, FieldPath, Record};
