//! Page navigation for paged listings.
//!
//! Pages are 1-based. A `count` of `-1` means the total is unknown: the
//! range label reads "more than N" and forward navigation is disabled, as
//! there is no known page to move towards.

use log::debug;

use crate::buffer::Buffer;
use crate::error::GridError;
use crate::rect::Rect;
use crate::span::Span;
use crate::style::{Role, Style, Theme};
use crate::text::group_thousands;

/// Pages moved by the first/last controls.
pub const SKIP_STRIDE: u32 = 10;

pub const DEFAULT_ROWS_PER_PAGE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowsPerPageOption {
    pub value: u32,
    pub label: String,
}

impl From<u32> for RowsPerPageOption {
    fn from(value: u32) -> Self {
        Self {
            value,
            label: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageControl {
    /// Skip back [`SKIP_STRIDE`] pages.
    First,
    Previous,
    Next,
    /// Skip forward [`SKIP_STRIDE`] pages.
    Last,
    RowsPerPage,
}

impl PageControl {
    pub fn glyph(self) -> &'static str {
        match self {
            PageControl::First => "«",
            PageControl::Previous => "‹",
            PageControl::Next => "›",
            PageControl::Last => "»",
            PageControl::RowsPerPage => "▾",
        }
    }

    pub fn aria_label(self) -> &'static str {
        match self {
            PageControl::First => "Go to first page",
            PageControl::Previous => "Go to previous page",
            PageControl::Next => "Go to next page",
            PageControl::Last => "Go to last page",
            PageControl::RowsPerPage => "Rows per page",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationEvent {
    PageChange(u32),
    RowsPerPageChange(u32),
}

/// Pagination state for one render. Never fetches; it only reports requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    count: i64,
    page: u32,
    rows_per_page: u32,
    options: Vec<RowsPerPageOption>,
    label_rows_per_page: String,
    show_first_button: bool,
    show_last_button: bool,
    disabled: bool,
}

impl Pagination {
    pub fn new(count: i64, page: u32, rows_per_page: u32) -> Result<Self, GridError> {
        if rows_per_page == 0 {
            return Err(GridError::ZeroRowsPerPage);
        }
        Ok(Self {
            count,
            page: page.max(1),
            rows_per_page,
            options: DEFAULT_ROWS_PER_PAGE_OPTIONS.iter().copied().map(Into::into).collect(),
            label_rows_per_page: "Rows per page:".to_string(),
            show_first_button: true,
            show_last_button: true,
            disabled: false,
        })
    }

    pub fn options(mut self, options: impl IntoIterator<Item = impl Into<RowsPerPageOption>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn label_rows_per_page(mut self, label: impl Into<String>) -> Self {
        self.label_rows_per_page = label.into();
        self
    }

    pub fn show_first_button(mut self, show: bool) -> Self {
        self.show_first_button = show;
        self
    }

    pub fn show_last_button(mut self, show: bool) -> Self {
        self.show_last_button = show;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn rows_per_page(&self) -> u32 {
        self.rows_per_page
    }

    pub fn is_unknown_total(&self) -> bool {
        self.count < 0
    }

    /// `None` while the total is unknown.
    pub fn total_pages(&self) -> Option<u32> {
        if self.is_unknown_total() {
            return None;
        }
        let pages = (self.count as u64).div_ceil(u64::from(self.rows_per_page));
        Some(u32::try_from(pages).unwrap_or(u32::MAX))
    }

    /// First row number shown, 1-based; 0 when there are no rows.
    pub fn from(&self) -> u64 {
        if self.count == 0 {
            return 0;
        }
        u64::from(self.page - 1) * u64::from(self.rows_per_page) + 1
    }

    pub fn to(&self) -> u64 {
        let end = u64::from(self.page) * u64::from(self.rows_per_page);
        if self.is_unknown_total() {
            end
        } else {
            end.min(self.count as u64)
        }
    }

    /// `"41–60 of 95"`, `"1–20 of more than 20"` or `"No records found"`.
    pub fn label(&self) -> String {
        if self.count == 0 {
            return "No records found".to_string();
        }
        let from = group_thousands(self.from() as i64);
        let to = group_thousands(self.to() as i64);
        if self.is_unknown_total() {
            format!("{}–{} of more than {}", from, to, to)
        } else {
            format!("{}–{} of {}", from, to, group_thousands(self.count))
        }
    }

    pub fn can_previous(&self) -> bool {
        !self.disabled && self.page > 1
    }

    pub fn can_next(&self) -> bool {
        if self.disabled {
            return false;
        }
        match self.total_pages() {
            Some(total) => self.page < total,
            None => false,
        }
    }

    pub fn is_enabled(&self, control: PageControl) -> bool {
        match control {
            PageControl::First => self.show_first_button && self.can_previous(),
            PageControl::Previous => self.can_previous(),
            PageControl::Next => self.can_next(),
            PageControl::Last => self.show_last_button && self.can_next(),
            PageControl::RowsPerPage => !self.disabled && !self.options.is_empty(),
        }
    }

    /// The page a navigation control requests, if it is enabled.
    pub fn target_page(&self, control: PageControl) -> Option<u32> {
        if !self.is_enabled(control) {
            return None;
        }
        match control {
            PageControl::First => Some(self.page.saturating_sub(SKIP_STRIDE).max(1)),
            PageControl::Previous => Some(self.page - 1),
            PageControl::Next => Some(self.page + 1),
            PageControl::Last => {
                let total = self.total_pages()?;
                Some(self.page.saturating_add(SKIP_STRIDE).min(total))
            }
            PageControl::RowsPerPage => None,
        }
    }

    /// Activate a control. The rows-per-page control cycles to the next option.
    pub fn activate(&self, control: PageControl) -> Option<PaginationEvent> {
        let event = match control {
            PageControl::RowsPerPage => self.cycle_rows_per_page(1),
            _ => self.target_page(control).map(PaginationEvent::PageChange),
        };
        if let Some(event) = event {
            debug!("pagination {:?} -> {:?}", control, event);
        }
        event
    }

    /// Pick a rows-per-page value directly. Only listed options are accepted.
    pub fn select_rows_per_page(&self, value: u32) -> Option<PaginationEvent> {
        if self.disabled || !self.options.iter().any(|o| o.value == value) {
            return None;
        }
        Some(PaginationEvent::RowsPerPageChange(value))
    }

    /// Step through the option list, wrapping at either end.
    pub fn cycle_rows_per_page(&self, step: i32) -> Option<PaginationEvent> {
        if !self.is_enabled(PageControl::RowsPerPage) {
            return None;
        }
        let len = self.options.len() as i32;
        let current = self
            .options
            .iter()
            .position(|o| o.value == self.rows_per_page)
            .map_or(0, |i| i as i32);
        let next = (current + step).rem_euclid(len) as usize;
        let value = self.options[next].value;
        (value != self.rows_per_page).then_some(PaginationEvent::RowsPerPageChange(value))
    }

    fn current_option_label(&self) -> String {
        self.options
            .iter()
            .find(|o| o.value == self.rows_per_page)
            .map_or_else(|| self.rows_per_page.to_string(), |o| o.label.clone())
    }
}

/// Where each control landed on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationLayout {
    y: u16,
    controls: Vec<(PageControl, u16, u16)>,
}

impl PaginationLayout {
    pub fn hit(&self, x: u16, y: u16) -> Option<PageControl> {
        if y != self.y {
            return None;
        }
        self.controls
            .iter()
            .find(|(_, start, width)| x >= *start && x < start + width)
            .map(|(control, _, _)| *control)
    }
}

/// Draw the control on the first line of `area`:
/// `Rows per page: 20 ▾   41–60 of 95   « ‹ › »`.
pub fn render_pagination(pagination: &Pagination, area: Rect, buf: &mut Buffer, theme: &Theme) -> PaginationLayout {
    let mut layout = PaginationLayout {
        y: area.y,
        controls: Vec::new(),
    };
    if area.is_empty() {
        return layout;
    }
    buf.fill(Rect::new(area.x, area.y, area.width, 1), theme.brush(&Style::new()));

    let muted = Style::new().fg(Role::Muted);
    let mut x = area.x;
    let put = |buf: &mut Buffer, x: &mut u16, span: Span| -> (u16, u16) {
        let start = *x;
        let room = area.right().saturating_sub(*x);
        let written = buf.put_str(*x, area.y, &span.text, room, theme.brush(&span.style));
        *x += written;
        (start, written)
    };

    if !pagination.options.is_empty() {
        put(buf, &mut x, Span::styled(format!("{} ", pagination.label_rows_per_page), muted));
        let selector = format!("{} {}", pagination.current_option_label(), PageControl::RowsPerPage.glyph());
        let (start, width) = put(buf, &mut x, Span::styled(selector, control_style(pagination, PageControl::RowsPerPage)));
        layout.controls.push((PageControl::RowsPerPage, start, width));
        put(buf, &mut x, Span::new("   "));
    }

    put(buf, &mut x, Span::styled(pagination.label(), muted));
    put(buf, &mut x, Span::new("   "));

    let mut controls = Vec::with_capacity(4);
    if pagination.show_first_button {
        controls.push(PageControl::First);
    }
    controls.extend([PageControl::Previous, PageControl::Next]);
    if pagination.show_last_button {
        controls.push(PageControl::Last);
    }
    for control in controls {
        let (start, width) = put(buf, &mut x, Span::styled(control.glyph(), control_style(pagination, control)));
        layout.controls.push((control, start, width));
        put(buf, &mut x, Span::new(" "));
    }

    layout
}

fn control_style(pagination: &Pagination, control: PageControl) -> Style {
    if pagination.is_enabled(control) {
        Style::new().fg(Role::Foreground).bold()
    } else {
        Style::new().fg(Role::Muted).dim()
    }
}
