//! Searchable select with single or multiple selection.
//!
//! The combobox never loads items. It reports search queries upward (after
//! the caller debounces them, see [`crate::DebouncedSearch`]) and renders
//! whatever items come back.

use std::time::Duration;

use log::debug;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::buffer::Buffer;
use crate::rect::Rect;
use crate::style::{Role, Style, Theme};
use crate::text::truncate;

/// Identity and label of a selectable item.
pub trait Choice {
    fn id(&self) -> String;
    fn label(&self) -> String;
}

impl Choice for String {
    fn id(&self) -> String {
        self.clone()
    }

    fn label(&self) -> String {
        self.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionMode<T> {
    Single(Option<T>),
    Multiple(Vec<T>),
}

impl<T> SelectionMode<T> {
    pub fn is_single(&self) -> bool {
        matches!(self, SelectionMode::Single(_))
    }

    pub fn selected(&self) -> Vec<&T> {
        match self {
            SelectionMode::Single(value) => value.iter().collect(),
            SelectionMode::Multiple(values) => values.iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SelectionMode::Single(value) => usize::from(value.is_some()),
            SelectionMode::Multiple(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboboxOptions {
    pub searchable: bool,
    /// Show a "type at least N characters" prompt instead of results.
    pub show_prompt: bool,
    pub placeholder: String,
    pub search_min_chars: usize,
    pub debounce: Duration,
    /// Multiple mode only.
    pub max_selected: Option<usize>,
    pub chip_preview_count: usize,
    pub disabled: bool,
}

impl Default for ComboboxOptions {
    fn default() -> Self {
        Self {
            searchable: true,
            show_prompt: false,
            placeholder: "Select…".to_string(),
            search_min_chars: 2,
            debounce: Duration::from_millis(300),
            max_selected: None,
            chip_preview_count: 3,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComboboxEvent<T> {
    /// The selection changed; carries the new value.
    Changed(SelectionMode<T>),
    LimitReached(usize),
}

/// What the results area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsStatus {
    Prompt(String),
    Error(String),
    NothingFound,
    Items,
}

#[derive(Debug, Clone)]
pub struct Combobox<T> {
    options: ComboboxOptions,
    value: SelectionMode<T>,
    open: bool,
    search: String,
}

impl<T: Choice + Clone> Combobox<T> {
    pub fn new(value: SelectionMode<T>, options: ComboboxOptions) -> Self {
        Self {
            options,
            value,
            open: false,
            search: String::new(),
        }
    }

    pub fn options(&self) -> &ComboboxOptions {
        &self.options
    }

    pub fn value(&self) -> &SelectionMode<T> {
        &self.value
    }

    /// Replace the value from outside, e.g. after the owner resets filters.
    pub fn set_value(&mut self, value: SelectionMode<T>) {
        self.value = value;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        if !self.options.disabled {
            self.open = true;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.value.selected().iter().any(|item| item.id() == id)
    }

    fn limit(&self) -> Option<usize> {
        match self.value {
            SelectionMode::Multiple(_) => self.options.max_selected,
            SelectionMode::Single(_) => None,
        }
    }

    pub fn at_limit(&self) -> bool {
        self.limit().is_some_and(|max| self.value.len() >= max)
    }

    /// An unselected item that cannot be added because the limit is reached.
    pub fn item_disabled(&self, item: &T) -> bool {
        self.at_limit() && !self.is_selected(&item.id())
    }

    /// Select `item`, or deselect it when already selected.
    pub fn toggle(&mut self, item: &T) -> Option<ComboboxEvent<T>> {
        if self.options.disabled {
            return None;
        }
        let id = item.id();
        if self.is_selected(&id) {
            return Some(self.remove(&id));
        }

        match &mut self.value {
            SelectionMode::Single(value) => {
                *value = Some(item.clone());
                self.open = false;
            }
            SelectionMode::Multiple(values) => {
                match self.options.max_selected {
                    Some(max) if values.len() >= max => {
                        debug!("combobox limit {} reached", max);
                        return Some(ComboboxEvent::LimitReached(max));
                    }
                    _ => values.push(item.clone()),
                }
            }
        }
        Some(ComboboxEvent::Changed(self.value.clone()))
    }

    pub fn remove(&mut self, id: &str) -> ComboboxEvent<T> {
        match &mut self.value {
            SelectionMode::Single(value) => *value = None,
            SelectionMode::Multiple(values) => values.retain(|v| v.id() != id),
        }
        ComboboxEvent::Changed(self.value.clone())
    }

    pub fn clear_all(&mut self) -> ComboboxEvent<T> {
        match &mut self.value {
            SelectionMode::Single(value) => *value = None,
            SelectionMode::Multiple(values) => values.clear(),
        }
        ComboboxEvent::Changed(self.value.clone())
    }

    /// The query to report upward for a (debounced) search text, if any.
    pub fn search_to_emit(&self, query: &str) -> Option<String> {
        if !query.is_empty() && query.chars().count() >= self.options.search_min_chars {
            Some(query.to_string())
        } else if query.is_empty() && !self.options.show_prompt {
            Some(String::new())
        } else {
            None
        }
    }

    pub fn status(&self, items: usize, loading: bool, error: Option<&str>) -> ResultsStatus {
        if self.options.show_prompt {
            return ResultsStatus::Prompt(format!(
                "Type at least {} characters…",
                self.options.search_min_chars
            ));
        }
        if let Some(error) = error {
            return ResultsStatus::Error(error.to_string());
        }
        if !loading && items == 0 {
            return ResultsStatus::NothingFound;
        }
        ResultsStatus::Items
    }

    /// Labels previewed on the trigger and how many more are hidden.
    pub fn chips(&self) -> (Vec<String>, usize) {
        let preview = if self.value.is_single() {
            1
        } else {
            self.options.chip_preview_count
        };
        let selected = self.value.selected();
        let labels = selected.iter().take(preview).map(|item| item.label()).collect();
        let overflow = match self.value {
            SelectionMode::Multiple(_) => selected.len().saturating_sub(preview),
            SelectionMode::Single(_) => 0,
        };
        (labels, overflow)
    }

    pub fn trigger_text(&self) -> String {
        let (labels, overflow) = self.chips();
        if labels.is_empty() {
            return self.options.placeholder.clone();
        }
        let mut text = labels.join(", ");
        if overflow > 0 {
            text.push_str(&format!(" +{}", overflow));
        }
        text
    }

    pub fn footer(&self) -> String {
        match (&self.value, self.options.max_selected) {
            (SelectionMode::Single(Some(_)), _) => "1 selected".to_string(),
            (SelectionMode::Single(None), _) => "None selected".to_string(),
            (SelectionMode::Multiple(values), Some(max)) => format!("{} / {} selected", values.len(), max),
            (SelectionMode::Multiple(values), None) => format!("{} selected", values.len()),
        }
    }

    pub fn limit_notice(&self) -> Option<String> {
        let max = self.limit()?;
        self.at_limit()
            .then(|| format!("You’ve reached the maximum of {}.", max))
    }
}

/// Fuzzy-match `query` against item labels.
///
/// Returns indices into `items`, best match first. An empty query keeps every
/// item in its original order.
pub fn filter_local<T: Choice>(query: &str, items: &[T]) -> Vec<usize> {
    if query.is_empty() {
        return (0..items.len()).collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(query, CaseMatching::Ignore, Normalization::Smart, AtomKind::Fuzzy);

    let mut scored: Vec<(usize, u32)> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let label = item.label();
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(&label, &mut buf);
            pattern.score(haystack, &mut matcher).map(|score| (index, score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(index, _)| index).collect()
}

/// Draw the open popover: search line, results with checkboxes, footer.
///
/// `items` are the results to list and `cursor` the highlighted one.
pub fn render_combobox<T: Choice + Clone>(
    combobox: &Combobox<T>,
    items: &[T],
    status: &ResultsStatus,
    cursor: Option<usize>,
    area: Rect,
    buf: &mut Buffer,
    theme: &Theme,
) {
    if area.is_empty() {
        return;
    }
    buf.fill(area, theme.brush(&Style::new().bg(Role::Stripe)));
    let base = Style::new().bg(Role::Stripe);
    let width = area.width.saturating_sub(2);
    let mut y = area.y;

    let line = |buf: &mut Buffer, y: u16, text: &str, style: Style| {
        let text = truncate(text, width as usize);
        buf.put_str(area.x + 1, y, &text, width, theme.brush(&base.patch(style)));
    };

    if combobox.options.searchable {
        let search = if combobox.search.is_empty() {
            format!("⌕ {}", combobox.options.placeholder)
        } else {
            format!("⌕ {}", combobox.search)
        };
        let style = if combobox.search.is_empty() {
            Style::new().fg(Role::Muted)
        } else {
            Style::new()
        };
        line(buf, y, &search, style);
        y += 1;
    }

    // leave room for the footer
    let list_bottom = area.bottom().saturating_sub(1);
    match status {
        ResultsStatus::Prompt(text) => line(buf, y, text, Style::new().fg(Role::Muted)),
        ResultsStatus::Error(text) => line(buf, y, text, Style::new().fg(Role::Danger)),
        ResultsStatus::NothingFound => line(buf, y, "No results.", Style::new().fg(Role::Muted)),
        ResultsStatus::Items => {
            for (i, item) in items.iter().enumerate() {
                if y >= list_bottom {
                    break;
                }
                let checked = combobox.is_selected(&item.id());
                let mark = if checked { "[x]" } else { "[ ]" };
                let mut style = if combobox.item_disabled(item) {
                    Style::new().fg(Role::Muted).dim()
                } else {
                    Style::new()
                };
                if cursor == Some(i) {
                    style = style.bg(Role::Cursor);
                }
                line(buf, y, &format!("{} {}", mark, item.label()), style);
                y += 1;
            }
        }
    }

    let footer = match combobox.limit_notice() {
        Some(notice) => format!("{}  {}", combobox.footer(), notice),
        None => combobox.footer(),
    };
    line(buf, list_bottom, &footer, Style::new().fg(Role::Muted));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct MemberRole {
        id: &'static str,
        name: &'static str,
    }

    impl Choice for MemberRole {
        fn id(&self) -> String {
            self.id.to_string()
        }

        fn label(&self) -> String {
            self.name.to_string()
        }
    }

    fn roles() -> Vec<MemberRole> {
        vec![
            MemberRole { id: "1", name: "Owner" },
            MemberRole { id: "2", name: "Manager" },
            MemberRole { id: "3", name: "Member" },
            MemberRole { id: "4", name: "Viewer" },
        ]
    }

    fn multiple(max: Option<usize>) -> Combobox<MemberRole> {
        let options = ComboboxOptions {
            max_selected: max,
            ..ComboboxOptions::default()
        };
        Combobox::new(SelectionMode::Multiple(Vec::new()), options)
    }

    #[test]
    fn single_add_replaces_and_closes() {
        let items = roles();
        let mut combo = Combobox::new(SelectionMode::Single(None), ComboboxOptions::default());
        combo.open();
        combo.toggle(&items[0]);
        combo.toggle(&items[1]);
        assert_eq!(combo.value(), &SelectionMode::Single(Some(items[1].clone())));
        assert!(!combo.is_open());
        assert_eq!(combo.footer(), "1 selected");

        combo.toggle(&items[1]);
        assert_eq!(combo.value(), &SelectionMode::Single(None));
        assert_eq!(combo.footer(), "None selected");
    }

    #[test]
    fn multiple_limit_blocks_additions() {
        let items = roles();
        let mut combo = multiple(Some(2));
        combo.toggle(&items[0]);
        combo.toggle(&items[1]);
        assert_eq!(combo.toggle(&items[2]), Some(ComboboxEvent::LimitReached(2)));
        assert_eq!(combo.value().len(), 2);
        assert!(combo.item_disabled(&items[2]));
        assert!(!combo.item_disabled(&items[0]));
        assert_eq!(combo.footer(), "2 / 2 selected");
        assert_eq!(combo.limit_notice().as_deref(), Some("You’ve reached the maximum of 2."));

        // removing is always allowed
        combo.toggle(&items[0]);
        assert_eq!(combo.value().len(), 1);
        assert!(!combo.at_limit());
    }

    #[test]
    fn search_emission_rules() {
        let combo = multiple(None);
        assert_eq!(combo.search_to_emit("m"), None);
        assert_eq!(combo.search_to_emit("ma").as_deref(), Some("ma"));
        assert_eq!(combo.search_to_emit("").as_deref(), Some(""));

        let prompt = Combobox::<MemberRole>::new(
            SelectionMode::Multiple(Vec::new()),
            ComboboxOptions {
                show_prompt: true,
                ..ComboboxOptions::default()
            },
        );
        assert_eq!(prompt.search_to_emit(""), None);
    }

    #[test]
    fn status_precedence() {
        let combo = multiple(None);
        assert_eq!(combo.status(0, false, Some("boom")), ResultsStatus::Error("boom".into()));
        assert_eq!(combo.status(0, false, None), ResultsStatus::NothingFound);
        assert_eq!(combo.status(0, true, None), ResultsStatus::Items);
        assert_eq!(combo.status(3, false, None), ResultsStatus::Items);
    }

    #[test]
    fn chips_preview_with_overflow() {
        let items = roles();
        let mut combo = multiple(None);
        for item in &items {
            combo.toggle(item);
        }
        let (labels, overflow) = combo.chips();
        assert_eq!(labels, vec!["Owner", "Manager", "Member"]);
        assert_eq!(overflow, 1);
        assert_eq!(combo.trigger_text(), "Owner, Manager, Member +1");
        assert_eq!(combo.footer(), "4 selected");
    }

    #[test]
    fn fuzzy_filter_ranks_and_drops() {
        let items = roles();
        let hits = filter_local("mem", &items);
        assert_eq!(hits.first(), Some(&2));
        assert!(!hits.contains(&0));
        assert_eq!(filter_local("", &items), vec![0, 1, 2, 3]);
    }
}
