//! Console state and input handling.
//!
//! [`App`] is synchronous: it turns input into [`Command`]s and is told about
//! their outcomes through the `finish_*` methods. The runner in `runner.rs`
//! performs the commands.

use std::path::PathBuf;

use log::{debug, info, warn};
use staffgrid::{
    ActionVariant, BulkAction, BulkActionsBar, BulkEvent, BulkHit, BulkLayout, Combobox,
    ComboboxEvent, ComboboxOptions, DataTable, DelegatedSort, GridError, Input, Key, PageControl,
    Pagination, PaginationEvent, PaginationLayout, RowLoading, RowTarget, SelectionMap,
    SelectionMode, Style, TableEvent, TableHit, TableLayout, TableProps, TableView, filter_local,
};
use staffwatch_lib::model::ProjectMember;
use staffwatch_lib::{ListQuery, Page};

use crate::members::{MemberRow, RoleChoice, columns, role_choices, row_key};
use crate::settings::TableSettings;
use crate::source::direction;

pub const ACTION_REMOVE: usize = 0;
pub const ACTION_EXPORT: usize = 1;

/// Work the runner carries out on behalf of the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch { request: u64, query: ListQuery },
    /// Raw search text; the runner debounces it.
    Search(String),
    RowAction { key: String },
    Remove { keys: Vec<String> },
    Export { rows: Vec<MemberRow> },
    SaveSettings(TableSettings),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
    RoleFilter,
}

/// Geometry of the last frame.
#[derive(Debug, Clone, Default)]
pub struct Layouts {
    pub table: TableLayout,
    pub pagination: PaginationLayout,
    pub bulk: BulkLayout,
}

pub struct App {
    table: DataTable<MemberRow>,
    rows: Vec<MemberRow>,
    count: i64,
    page: u32,
    rows_per_page: u32,
    loading: bool,
    error: Option<String>,
    request: u64,

    selection: SelectionMap<MemberRow>,
    busy: RowLoading,
    bulk: BulkActionsBar,

    roles: Combobox<RoleChoice>,
    role_items: Vec<RoleChoice>,
    role_cursor: usize,
    applied_roles: Vec<String>,

    search_input: String,
    applied_search: String,

    mode: Mode,
    cursor: usize,
    column: usize,
    status: Option<String>,
    remote_sort: bool,
    base_url: Option<String>,
    layouts: Layouts,
}

impl App {
    pub fn new(settings: &TableSettings, remote_sort: bool, can_remove: bool) -> Result<Self, GridError> {
        // validates rows_per_page once; later pagination builds cannot fail
        Pagination::new(0, 1, settings.rows_per_page)?;

        let mut table = DataTable::new(columns())?
            .sortable(true)
            .selection(true)
            .row_key(row_key)
            .empty_message("No members found")
            .striped();
        if remote_sort {
            table = table.sorting(DelegatedSort);
        }
        if let Some((key, order)) = &settings.sort {
            table = table.default_sort(key.clone(), *order);
        }

        let bulk = BulkActionsBar::new(vec![
            BulkAction::new("Remove")
                .icon("✕")
                .variant(ActionVariant::Destructive)
                .disabled(!can_remove),
            BulkAction::new("Export").icon("⇩"),
        ]);

        let roles = Combobox::new(
            SelectionMode::Multiple(Vec::new()),
            ComboboxOptions {
                placeholder: "All roles".to_string(),
                search_min_chars: 1,
                ..ComboboxOptions::default()
            },
        );

        Ok(Self {
            table,
            rows: Vec::new(),
            count: 0,
            page: 1,
            rows_per_page: settings.rows_per_page,
            loading: false,
            error: None,
            request: 0,
            selection: SelectionMap::new(),
            busy: RowLoading::new(),
            bulk,
            roles,
            role_items: role_choices(),
            role_cursor: 0,
            applied_roles: Vec::new(),
            search_input: String::new(),
            applied_search: String::new(),
            mode: Mode::Browse,
            cursor: 0,
            column: 0,
            status: None,
            remote_sort,
            base_url: settings.base_url.clone(),
            layouts: Layouts::default(),
        })
    }

    // ------------------------------------------------------------------
    // Read access for drawing
    // ------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selection(&self) -> &SelectionMap<MemberRow> {
        &self.selection
    }

    pub fn busy(&self) -> &RowLoading {
        &self.busy
    }

    pub fn bulk(&self) -> &BulkActionsBar {
        &self.bulk
    }

    pub fn roles(&self) -> &Combobox<RoleChoice> {
        &self.roles
    }

    pub fn role_items(&self) -> &[RoleChoice] {
        &self.role_items
    }

    pub fn role_cursor(&self) -> usize {
        self.role_cursor
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn status(&self) -> Option<&str> {
        self.error.as_deref().or(self.status.as_deref())
    }

    pub fn set_layouts(&mut self, layouts: Layouts) {
        self.layouts = layouts;
    }

    fn props(&self) -> TableProps<'_, MemberRow> {
        TableProps::new(&self.rows)
            .loading(self.loading)
            .selection(&self.selection)
            .busy(&self.busy)
    }

    pub fn table_view(&self) -> TableView {
        let show_cursor = self.mode == Mode::Browse && !self.loading && !self.rows.is_empty();
        let mut view = self
            .table
            .view(&self.props())
            .with_cursor(show_cursor.then_some(self.cursor))
            .with_scroll(self.layouts.table.scroll());
        if let Some(header) = view.header.get_mut(self.column) {
            header.style = header.style.patch(Style::new().underline());
        }
        view
    }

    pub fn pagination(&self) -> Option<Pagination> {
        Pagination::new(self.count, self.page, self.rows_per_page)
            .ok()
            .map(|p| p.disabled(self.loading))
    }

    pub fn settings(&self) -> TableSettings {
        let sort = self.table.sort_state();
        TableSettings {
            rows_per_page: self.rows_per_page,
            sort: sort.key().map(|key| (key.to_string(), sort.order())),
            base_url: self.base_url.clone(),
        }
    }

    pub fn query(&self) -> ListQuery {
        let mut query = ListQuery::new().page(self.page).limit(self.rows_per_page);
        if !self.applied_search.is_empty() {
            query = query.search(self.applied_search.clone());
        }
        if !self.applied_roles.is_empty() {
            query = query.role(self.applied_roles.join(","));
        }
        if self.remote_sort {
            let sort = self.table.sort_state();
            if let Some(key) = sort.key() {
                query = query.sort_by(key, direction(sort.order()));
            }
        }
        query
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    /// The first load.
    pub fn start(&mut self) -> Command {
        self.begin_fetch()
    }

    fn begin_fetch(&mut self) -> Command {
        self.request += 1;
        self.loading = true;
        self.error = None;
        Command::Fetch {
            request: self.request,
            query: self.query(),
        }
    }

    /// Outcome of a fetch. Answers to superseded requests are dropped.
    pub fn finish_fetch(&mut self, request: u64, result: Result<Page<ProjectMember>, String>) -> Vec<Command> {
        if request != self.request {
            debug!("dropping stale page response {}", request);
            return Vec::new();
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.count = page.count();
                self.rows = page.results.into_iter().map(MemberRow).collect();
                self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));

                // the page emptied underneath us, e.g. after a removal
                let last = self.pagination().and_then(|p| p.total_pages()).unwrap_or(1).max(1);
                if self.rows.is_empty() && self.page > last {
                    self.page = last;
                    return vec![self.begin_fetch()];
                }
            }
            Err(message) => {
                warn!("member fetch failed: {}", message);
                self.rows.clear();
                self.count = 0;
                self.error = Some(format!("Could not load members: {}", message));
            }
        }
        Vec::new()
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn handle_input(&mut self, input: Input) -> Vec<Command> {
        match input {
            Input::Key { key: Key::Char('c'), modifiers } if modifiers.ctrl => vec![Command::Quit],
            Input::Key { key, .. } => match self.mode {
                Mode::Browse => self.browse_key(key),
                Mode::Search => self.search_key(key),
                Mode::RoleFilter => self.role_key(key),
            },
            Input::Click { x, y } => self.click(x, y),
            Input::Scroll { x, y, delta } => {
                if self.mode == Mode::Browse && self.layouts.table.area().contains(x, y) {
                    self.move_cursor(i32::from(delta));
                }
                Vec::new()
            }
            Input::Resize { .. } => Vec::new(),
        }
    }

    fn browse_key(&mut self, key: Key) -> Vec<Command> {
        match key {
            Key::Char('q') => vec![Command::Quit],
            Key::Up => self.move_cursor(-1),
            Key::Down => self.move_cursor(1),
            Key::Home => self.move_cursor(i32::MIN),
            Key::End => self.move_cursor(i32::MAX),
            Key::Left => {
                self.column = self.column.saturating_sub(1);
                Vec::new()
            }
            Key::Right => {
                self.column = (self.column + 1).min(self.table.columns().len() - 1);
                Vec::new()
            }
            Key::Char('s') => self.sort(self.column),
            Key::Char(' ') => self.row_target(self.cursor, RowTarget::Checkbox),
            Key::Char('a') => self.select_all(),
            Key::Enter => self.row_action(self.cursor),
            Key::Char('n') | Key::PageDown => self.page_control(PageControl::Next),
            Key::Char('p') | Key::PageUp => self.page_control(PageControl::Previous),
            Key::Char('N') => self.page_control(PageControl::Last),
            Key::Char('P') => self.page_control(PageControl::First),
            Key::Char('+') => self.cycle_rows_per_page(1),
            Key::Char('-') => self.cycle_rows_per_page(-1),
            Key::Char('/') => {
                self.mode = Mode::Search;
                Vec::new()
            }
            Key::Char('r') => {
                self.roles.open();
                if self.roles.is_open() {
                    self.mode = Mode::RoleFilter;
                    self.refresh_role_items();
                }
                Vec::new()
            }
            Key::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.bulk_action(index)
            }
            Key::Escape => self.clear_selection(),
            _ => Vec::new(),
        }
    }

    fn search_key(&mut self, key: Key) -> Vec<Command> {
        match key {
            Key::Char(c) => {
                self.search_input.push(c);
                vec![Command::Search(self.search_input.clone())]
            }
            Key::Backspace => {
                self.search_input.pop();
                vec![Command::Search(self.search_input.clone())]
            }
            Key::Enter => {
                self.mode = Mode::Browse;
                Vec::new()
            }
            Key::Escape => {
                self.mode = Mode::Browse;
                if self.search_input.is_empty() {
                    return Vec::new();
                }
                self.search_input.clear();
                vec![Command::Search(String::new())]
            }
            _ => Vec::new(),
        }
    }

    fn role_key(&mut self, key: Key) -> Vec<Command> {
        match key {
            Key::Up => {
                self.role_cursor = self.role_cursor.saturating_sub(1);
                Vec::new()
            }
            Key::Down => {
                self.role_cursor = (self.role_cursor + 1).min(self.role_items.len().saturating_sub(1));
                Vec::new()
            }
            Key::Enter | Key::Char(' ') => {
                if let Some(item) = self.role_items.get(self.role_cursor).copied() {
                    if let Some(ComboboxEvent::LimitReached(max)) = self.roles.toggle(&item) {
                        self.status = Some(format!("At most {} roles", max));
                    }
                }
                Vec::new()
            }
            Key::Delete => {
                self.roles.clear_all();
                Vec::new()
            }
            Key::Char(c) => {
                let mut search = self.roles.search_text().to_string();
                search.push(c);
                self.roles.set_search(search);
                self.refresh_role_items();
                Vec::new()
            }
            Key::Backspace => {
                let mut search = self.roles.search_text().to_string();
                search.pop();
                self.roles.set_search(search);
                self.refresh_role_items();
                Vec::new()
            }
            Key::Escape | Key::Tab => self.close_role_filter(),
            _ => Vec::new(),
        }
    }

    fn refresh_role_items(&mut self) {
        let all = role_choices();
        let query = self.roles.search_to_emit(self.roles.search_text()).unwrap_or_default();
        self.role_items = filter_local(&query, &all).into_iter().map(|i| all[i]).collect();
        self.role_cursor = self.role_cursor.min(self.role_items.len().saturating_sub(1));
    }

    fn close_role_filter(&mut self) -> Vec<Command> {
        self.roles.close();
        self.roles.set_search("");
        self.mode = Mode::Browse;

        let chosen: Vec<String> = self.roles.value().selected().iter().map(|r| r.0.as_str().to_string()).collect();
        if chosen == self.applied_roles {
            return Vec::new();
        }
        info!("role filter {:?}", chosen);
        self.applied_roles = chosen;
        self.page = 1;
        self.cursor = 0;
        vec![self.begin_fetch()]
    }

    /// A search value that has been quiet long enough.
    pub fn apply_search(&mut self, settled: &str) -> Vec<Command> {
        let settled = settled.trim();
        if settled == self.applied_search {
            return Vec::new();
        }
        debug!("search {:?}", settled);
        self.applied_search = settled.to_string();
        self.page = 1;
        self.cursor = 0;
        vec![self.begin_fetch()]
    }

    fn move_cursor(&mut self, delta: i32) -> Vec<Command> {
        let last = self.rows.len().saturating_sub(1) as i64;
        let next = (self.cursor as i64).saturating_add(i64::from(delta)).clamp(0, last.max(0));
        self.cursor = next as usize;
        Vec::new()
    }

    fn click(&mut self, x: u16, y: u16) -> Vec<Command> {
        if self.mode == Mode::RoleFilter {
            return self.close_role_filter();
        }
        if let Some(hit) = self.layouts.bulk.hit(x, y) {
            return match hit {
                BulkHit::Action(index) => self.bulk_action(index),
                BulkHit::Clear => self.clear_selection(),
            };
        }
        if let Some(control) = self.layouts.pagination.hit(x, y) {
            return self.page_control(control);
        }
        match self.layouts.table.hit(x, y) {
            Some(TableHit::Header(col)) => {
                self.column = col;
                self.sort(col)
            }
            Some(TableHit::SelectAll) => self.select_all(),
            Some(TableHit::Row { position, target }) => {
                self.cursor = position;
                if let RowTarget::Cell(col) = target {
                    self.column = col;
                }
                self.row_target(position, target)
            }
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Table
    // ------------------------------------------------------------------

    fn sort(&mut self, col: usize) -> Vec<Command> {
        let Some(TableEvent::Sort { key, order }) = self.table.header_click(col) else {
            return Vec::new();
        };
        info!("sort by {} {}", key, order);
        let mut commands = vec![Command::SaveSettings(self.settings())];
        if self.remote_sort {
            commands.push(self.begin_fetch());
        }
        commands
    }

    fn row_target(&mut self, position: usize, target: RowTarget) -> Vec<Command> {
        let events = self.table.row_click(&self.props(), position, target);
        for event in &events {
            self.table.apply_selection(event, &self.rows, &mut self.selection);
        }
        Vec::new()
    }

    fn select_all(&mut self) -> Vec<Command> {
        let event = self.table.select_all_click(&self.props());
        if let Some(event) = event {
            self.table.apply_selection(&event, &self.rows, &mut self.selection);
        }
        Vec::new()
    }

    /// Per-row action on the row under the cursor. Rows already busy are skipped.
    fn row_action(&mut self, position: usize) -> Vec<Command> {
        let events = self.table.row_click(&self.props(), position, RowTarget::Row);
        let Some(TableEvent::RowClick { index, .. }) = events.first() else {
            return Vec::new();
        };
        let Some(row) = self.rows.get(*index) else {
            return Vec::new();
        };
        let key = row.id().to_string();
        if !self.busy.start(key.clone()) {
            return Vec::new();
        }
        vec![Command::RowAction { key }]
    }

    pub fn finish_row_action(&mut self, key: &str) {
        self.busy.stop(key);
        if let Some(row) = self.rows.iter().find(|r| r.id() == key) {
            self.status = Some(format!("Invitation re-sent to {}", row.0.user.email));
        }
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    fn page_control(&mut self, control: PageControl) -> Vec<Command> {
        let event = self.pagination().and_then(|p| p.activate(control));
        self.apply_pagination(event)
    }

    fn cycle_rows_per_page(&mut self, step: i32) -> Vec<Command> {
        let event = self.pagination().and_then(|p| p.cycle_rows_per_page(step));
        self.apply_pagination(event)
    }

    fn apply_pagination(&mut self, event: Option<PaginationEvent>) -> Vec<Command> {
        match event {
            Some(PaginationEvent::PageChange(page)) => {
                self.page = page;
                self.cursor = 0;
                vec![self.begin_fetch()]
            }
            Some(PaginationEvent::RowsPerPageChange(rows)) => {
                self.rows_per_page = rows;
                self.page = 1;
                self.cursor = 0;
                vec![Command::SaveSettings(self.settings()), self.begin_fetch()]
            }
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Bulk actions
    // ------------------------------------------------------------------

    fn bulk_action(&mut self, index: usize) -> Vec<Command> {
        let Some(BulkEvent::Action { index, rows }) = self.bulk.activate(index, &self.selection) else {
            return Vec::new();
        };
        match index {
            ACTION_REMOVE => {
                let keys: Vec<String> = rows.iter().map(|r| r.id().to_string()).collect();
                for key in &keys {
                    self.busy.start(key.clone());
                }
                vec![Command::Remove { keys }]
            }
            ACTION_EXPORT => vec![Command::Export { rows }],
            _ => Vec::new(),
        }
    }

    fn clear_selection(&mut self) -> Vec<Command> {
        if !self.selection.is_empty() {
            self.bulk.clear(&mut self.selection);
        }
        Vec::new()
    }

    pub fn finish_remove(&mut self, keys: &[String], result: Result<usize, String>) -> Vec<Command> {
        for key in keys {
            self.busy.stop(key);
        }
        match result {
            Ok(removed) => {
                for key in keys {
                    self.selection.remove(key);
                }
                let noun = if removed == 1 { "member" } else { "members" };
                self.status = Some(format!("Removed {} {}", removed, noun));
                vec![self.begin_fetch()]
            }
            Err(message) => {
                self.status = Some(format!("Remove failed: {}", message));
                Vec::new()
            }
        }
    }

    pub fn finish_export(&mut self, result: Result<PathBuf, String>) {
        self.status = Some(match result {
            Ok(path) => format!("Exported to {}", path.display()),
            Err(message) => format!("Export failed: {}", message),
        });
    }
}

#[cfg(test)]
mod tests {
    use staffgrid::{Modifiers, SortOrder};

    use super::*;
    use crate::source::{FixtureSource, MemberSource};

    fn key(c: char) -> Input {
        Input::key(Key::Char(c))
    }

    async fn loaded(total: usize, remote_sort: bool) -> App {
        let mut app = App::new(&TableSettings::default(), remote_sort, true).unwrap();
        let source = FixtureSource::generated(total);
        let Command::Fetch { request, query } = app.start() else {
            panic!("expected fetch");
        };
        let page = source.fetch(&query).await.unwrap();
        app.finish_fetch(request, Ok(page));
        app
    }

    fn fetch_of(commands: &[Command]) -> Option<(u64, ListQuery)> {
        commands.iter().find_map(|c| match c {
            Command::Fetch { request, query } => Some((*request, query.clone())),
            _ => None,
        })
    }

    #[tokio::test]
    async fn first_load_fills_the_page() {
        let app = loaded(60, false).await;
        assert!(!app.is_loading());
        assert_eq!(app.table_view().body.rows().len(), 25);
        assert_eq!(app.pagination().unwrap().label(), "1–25 of 60");
    }

    #[tokio::test]
    async fn stale_responses_are_dropped() {
        let mut app = loaded(60, false).await;
        let (current, _) = fetch_of(&app.handle_input(key('n'))).unwrap();
        assert!(app.is_loading());

        app.finish_fetch(current - 1, Err("late".into()));
        assert!(app.is_loading());
        assert_eq!(app.status(), None);
    }

    #[tokio::test]
    async fn paging_keys_request_pages() {
        let mut app = loaded(300, false).await;
        let (_, query) = fetch_of(&app.handle_input(key('N'))).unwrap();
        assert_eq!(query.page, Some(11));
        assert_eq!(app.query().page, Some(11));

        // loading disables the control until the page arrives
        assert!(app.handle_input(key('p')).is_empty());
    }

    #[tokio::test]
    async fn rows_per_page_cycles_and_saves() {
        let mut app = loaded(60, false).await;
        let commands = app.handle_input(key('+'));
        assert!(commands.contains(&Command::SaveSettings(TableSettings {
            rows_per_page: 50,
            ..TableSettings::default()
        })));
        let (_, query) = fetch_of(&commands).unwrap();
        assert_eq!((query.page, query.limit), (Some(1), Some(50)));
    }

    #[tokio::test]
    async fn local_sort_does_not_refetch() {
        let mut app = loaded(30, false).await;
        let commands = app.handle_input(key('s'));
        assert!(fetch_of(&commands).is_none());
        assert_eq!(
            app.settings().sort,
            Some(("user.name".to_string(), SortOrder::Asc))
        );

        let view = app.table_view();
        let names: Vec<&str> = view.body.rows().iter().map(|r| r.cells[0].text.as_str()).collect();
        let mut sorted: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
        sorted.sort();
        assert_eq!(names.iter().map(|n| n.to_lowercase()).collect::<Vec<_>>(), sorted);
    }

    #[tokio::test]
    async fn remote_sort_refetches_with_sort_by() {
        let mut app = loaded(30, true).await;
        app.handle_input(Input::key(Key::Right));
        app.handle_input(key('s'));
        let (_, query) = fetch_of(&app.handle_input(key('s'))).unwrap();
        assert_eq!(query.sort_by, Some(("user.email".to_string(), staffwatch_lib::Direction::Desc)));
    }

    #[tokio::test]
    async fn selection_and_bulk_remove() {
        let mut app = loaded(30, false).await;
        app.handle_input(key(' '));
        app.handle_input(Input::key(Key::Down));
        app.handle_input(key(' '));
        assert_eq!(app.selection().len(), 2);

        let commands = app.handle_input(key('1'));
        let [Command::Remove { keys }] = commands.as_slice() else {
            panic!("expected remove, got {:?}", commands);
        };
        assert_eq!(keys, &vec!["m001".to_string(), "m002".to_string()]);
        assert!(app.busy().is_loading("m001"));

        let keys = keys.clone();
        let after = app.finish_remove(&keys, Ok(2));
        assert!(fetch_of(&after).is_some());
        assert!(app.selection().is_empty());
        assert!(app.busy().is_empty());
        assert_eq!(app.status(), Some("Removed 2 members"));
    }

    #[tokio::test]
    async fn select_all_then_escape_clears() {
        let mut app = loaded(30, false).await;
        app.handle_input(key('a'));
        assert_eq!(app.selection().len(), 25);
        app.handle_input(Input::key(Key::Escape));
        assert!(app.selection().is_empty());
    }

    #[tokio::test]
    async fn export_carries_selected_rows() {
        let mut app = loaded(5, false).await;
        app.handle_input(key(' '));
        let commands = app.handle_input(key('2'));
        let [Command::Export { rows }] = commands.as_slice() else {
            panic!("expected export");
        };
        assert_eq!(rows[0].id(), "m001");
    }

    #[tokio::test]
    async fn remove_is_disabled_without_support() {
        let mut app = App::new(&TableSettings::default(), true, false).unwrap();
        let source = FixtureSource::generated(3);
        let Command::Fetch { request, query } = app.start() else {
            panic!("expected fetch");
        };
        app.finish_fetch(request, Ok(source.fetch(&query).await.unwrap()));
        app.handle_input(key(' '));
        assert!(app.handle_input(key('1')).is_empty());
    }

    #[tokio::test]
    async fn row_action_marks_row_busy_once() {
        let mut app = loaded(5, false).await;
        let commands = app.handle_input(Input::key(Key::Enter));
        assert_eq!(commands, vec![Command::RowAction { key: "m001".into() }]);
        assert!(app.handle_input(Input::key(Key::Enter)).is_empty());
        assert!(app.table_view().body.rows()[0].busy);

        app.finish_row_action("m001");
        assert!(!app.busy().is_loading("m001"));
        assert_eq!(app.status(), Some("Invitation re-sent to ann.lee0@example.com"));
    }

    #[tokio::test]
    async fn search_mode_reports_raw_text_and_applies_settled() {
        let mut app = loaded(30, false).await;
        app.handle_input(key('/'));
        assert_eq!(app.mode(), Mode::Search);
        app.handle_input(key('a'));
        let commands = app.handle_input(key('n'));
        assert_eq!(commands, vec![Command::Search("an".into())]);
        app.handle_input(Input::key(Key::Enter));
        assert_eq!(app.mode(), Mode::Browse);

        let (_, query) = fetch_of(&app.apply_search("an ")).unwrap();
        assert_eq!(query.search.as_deref(), Some("an"));
        assert_eq!(query.page, Some(1));
        assert!(app.apply_search("an").is_empty());
    }

    #[tokio::test]
    async fn role_filter_applies_on_close() {
        let mut app = loaded(30, false).await;
        app.handle_input(key('r'));
        assert_eq!(app.mode(), Mode::RoleFilter);

        app.handle_input(key('m'));
        app.handle_input(key('a'));
        app.handle_input(key('n'));
        assert_eq!(app.role_items()[0], RoleChoice(staffwatch_lib::model::ProjectRole::Manager));
        app.handle_input(Input::key(Key::Enter));

        let (_, query) = fetch_of(&app.handle_input(Input::key(Key::Escape))).unwrap();
        assert_eq!(query.role.as_deref(), Some("manager"));
        assert_eq!(app.mode(), Mode::Browse);
        assert_eq!(app.roles().trigger_text(), "Manager");
    }

    #[tokio::test]
    async fn ctrl_c_quits_from_any_mode() {
        let mut app = loaded(3, false).await;
        app.handle_input(key('/'));
        let quit = Input::Key {
            key: Key::Char('c'),
            modifiers: Modifiers::ctrl(),
        };
        assert_eq!(app.handle_input(quit), vec![Command::Quit]);
    }

    #[tokio::test]
    async fn emptied_last_page_steps_back() {
        let mut app = loaded(26, false).await;
        let (request, _) = fetch_of(&app.handle_input(key('n'))).unwrap();
        let shrunk = FixtureSource::generated(25);
        let page = shrunk.fetch(&ListQuery::new().page(2).limit(25)).await.unwrap();
        let commands = app.finish_fetch(request, Ok(page));
        let (_, query) = fetch_of(&commands).unwrap();
        assert_eq!(query.page, Some(1));
    }

    #[tokio::test]
    async fn fetch_errors_surface_in_status() {
        let mut app = App::new(&TableSettings::default(), false, true).unwrap();
        let Command::Fetch { request, .. } = app.start() else {
            panic!("expected fetch");
        };
        app.finish_fetch(request, Err("HTTP 500: boom".into()));
        assert_eq!(app.status(), Some("Could not load members: HTTP 500: boom"));
        assert!(app.table_view().body.rows().is_empty());
    }
}
