use crate::column::Column;
use crate::error::GridError;
use crate::row_loading::RowLoading;
use crate::selection::{SelectAllState, SelectionMap};
use crate::sort::{LocalSort, SortOrder, SortState, SortingStrategy};
use crate::value::Record;

/// Row identity: `(row, index in the page) -> key`.
pub type RowKeyFn<T> = Box<dyn Fn(&T, usize) -> String + Send + Sync>;

/// Construction-time options.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Global gate for header sorting.
    pub sortable: bool,
    /// Show the checkbox column.
    pub selection: bool,
    /// Placeholder rows drawn while loading.
    pub skeleton_rows: usize,
    pub empty_message: String,
    pub striped: bool,
    pub bordered: bool,
    pub compact: bool,
    /// Rule lines between body rows.
    pub divider: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sortable: false,
            selection: false,
            skeleton_rows: 5,
            empty_message: "No data available".to_string(),
            striped: false,
            bordered: false,
            compact: false,
            divider: false,
        }
    }
}

/// Per-render inputs. The table treats all of them as read-only.
pub struct TableProps<'a, T> {
    pub data: &'a [T],
    pub loading: bool,
    pub selection: Option<&'a SelectionMap<T>>,
    pub busy: Option<&'a RowLoading>,
}

impl<'a, T> TableProps<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self {
            data,
            loading: false,
            selection: None,
            busy: None,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn selection(mut self, selection: &'a SelectionMap<T>) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn busy(mut self, busy: &'a RowLoading) -> Self {
        self.busy = Some(busy);
        self
    }
}

/// A table over rows of type `T`.
pub struct DataTable<T> {
    pub(super) columns: Vec<Column<T>>,
    pub(super) row_key: Option<RowKeyFn<T>>,
    pub(super) strategy: Box<dyn SortingStrategy<T>>,
    pub(super) sort: SortState,
    pub(super) config: TableConfig,
}

impl<T: Record> DataTable<T> {
    /// Create a table sorting locally. Fails when `columns` is empty.
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, GridError> {
        if columns.is_empty() {
            return Err(GridError::NoColumns);
        }
        Ok(Self {
            columns,
            row_key: None,
            strategy: Box::new(LocalSort),
            sort: SortState::new(),
            config: TableConfig::default(),
        })
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.config.sortable = sortable;
        self
    }

    pub fn default_sort(mut self, key: impl Into<String>, order: SortOrder) -> Self {
        self.sort = SortState::with_default(key, order);
        self
    }

    /// Choose who orders rows. [`crate::DelegatedSort`] hands ordering to the caller.
    pub fn sorting(mut self, strategy: impl SortingStrategy<T> + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    pub fn row_key(mut self, key: impl Fn(&T, usize) -> String + Send + Sync + 'static) -> Self {
        self.row_key = Some(Box::new(key));
        self
    }

    pub fn selection(mut self, enabled: bool) -> Self {
        self.config.selection = enabled;
        self
    }

    pub fn skeleton_rows(mut self, rows: usize) -> Self {
        self.config.skeleton_rows = rows;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.config.empty_message = message.into();
        self
    }

    pub fn striped(mut self) -> Self {
        self.config.striped = true;
        self
    }

    pub fn bordered(mut self) -> Self {
        self.config.bordered = true;
        self
    }

    pub fn compact(mut self) -> Self {
        self.config.compact = true;
        self
    }

    pub fn divider(mut self) -> Self {
        self.config.divider = true;
        self
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn is_delegated(&self) -> bool {
        self.strategy.is_delegated()
    }

    /// Mirror caller-owned sort values into the indicator state.
    pub fn sync_sort(&mut self, key: Option<&str>, order: Option<SortOrder>) {
        self.sort.mirror(key, order);
    }

    /// Render order as indices into `data`.
    pub fn row_order(&self, data: &[T]) -> Vec<usize> {
        if !self.config.sortable {
            return (0..data.len()).collect();
        }
        self.strategy.arrange(data, &self.sort)
    }

    /// Identity of `row` at `index` in the page; `None` without a row key.
    pub fn key_of(&self, row: &T, index: usize) -> Option<String> {
        self.row_key.as_ref().map(|key| key(row, index))
    }

    /// The page's rows paired with their keys; `None` without a row key.
    pub fn keyed_rows<'a>(&self, data: &'a [T]) -> Option<Vec<(String, &'a T)>> {
        let key = self.row_key.as_ref()?;
        Some(data.iter().enumerate().map(|(i, row)| (key(row, i), row)).collect())
    }

    /// Header checkbox state for the page in `props`.
    pub fn select_all_state(&self, props: &TableProps<'_, T>) -> SelectAllState {
        if !self.config.selection {
            return SelectAllState::default();
        }
        let (Some(selection), Some(keyed)) = (props.selection, self.keyed_rows(props.data)) else {
            return SelectAllState::default();
        };
        SelectAllState::derive(keyed.iter().map(|(key, _)| key.as_str()), selection)
    }

    pub(super) fn is_selected(&self, props: &TableProps<'_, T>, key: Option<&str>) -> bool {
        match (key, props.selection) {
            (Some(key), Some(selection)) => selection.contains(key),
            _ => false,
        }
    }
}
