//! The bar offering actions over the current selection.
//!
//! It reads the same caller-owned [`SelectionMap`] the table reports into and
//! is hidden whenever that map is empty.

use log::debug;

use crate::buffer::Buffer;
use crate::rect::Rect;
use crate::selection::SelectionMap;
use crate::style::{Role, Style, Theme};

const CLEAR_GLYPH: &str = "✕";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionVariant {
    Default,
    Destructive,
    Outline,
    #[default]
    Secondary,
    Ghost,
    Link,
}

impl ActionVariant {
    fn style(self) -> Style {
        match self {
            ActionVariant::Default => Style::new().fg(Role::Primary).bold(),
            ActionVariant::Destructive => Style::new().fg(Role::Danger).bold(),
            ActionVariant::Outline | ActionVariant::Secondary => Style::new().fg(Role::Foreground),
            ActionVariant::Ghost => Style::new().fg(Role::Muted),
            ActionVariant::Link => Style::new().fg(Role::Primary).underline(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkAction {
    pub label: String,
    pub icon: Option<String>,
    pub variant: ActionVariant,
    pub disabled: bool,
}

impl BulkAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            variant: ActionVariant::default(),
            disabled: false,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn caption(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{} {}", icon, self.label),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BulkEvent<T> {
    /// Action `index` invoked with the selected rows, in selection order.
    Action { index: usize, rows: Vec<T> },
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkHit {
    Action(usize),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkActionsBar {
    actions: Vec<BulkAction>,
}

impl BulkActionsBar {
    pub fn new(actions: Vec<BulkAction>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[BulkAction] {
        &self.actions
    }

    pub fn is_visible<T>(&self, selection: &SelectionMap<T>) -> bool {
        !selection.is_empty()
    }

    pub fn summary(count: usize) -> String {
        let noun = if count == 1 { "item" } else { "items" };
        format!("{} {} selected", count, noun)
    }

    /// Invoke action `index` against the current selection.
    pub fn activate<T: Clone>(&self, index: usize, selection: &SelectionMap<T>) -> Option<BulkEvent<T>> {
        if selection.is_empty() {
            return None;
        }
        let action = self.actions.get(index)?;
        if action.disabled {
            return None;
        }
        debug!("bulk action {:?} on {} rows", action.label, selection.len());
        Some(BulkEvent::Action {
            index,
            rows: selection.rows().cloned().collect(),
        })
    }

    pub fn clear<T>(&self, selection: &mut SelectionMap<T>) -> BulkEvent<T> {
        debug!("bulk selection cleared ({} rows)", selection.len());
        selection.clear();
        BulkEvent::Cleared
    }
}

/// Screen positions of the bar's controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkLayout {
    y: u16,
    targets: Vec<(BulkHit, u16, u16)>,
}

impl BulkLayout {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<BulkHit> {
        if y != self.y {
            return None;
        }
        self.targets
            .iter()
            .find(|(_, start, width)| x >= *start && x < start + width)
            .map(|(hit, _, _)| *hit)
    }
}

/// Draw `12 items selected │ 1 Remove  2 Export │ ✕` on the first line of
/// `area`. Draws nothing when `selected` is zero.
pub fn render_bulk_bar(bar: &BulkActionsBar, selected: usize, area: Rect, buf: &mut Buffer, theme: &Theme) -> BulkLayout {
    let mut layout = BulkLayout {
        y: area.y,
        targets: Vec::new(),
    };
    if selected == 0 || area.is_empty() {
        return layout;
    }
    let base = Style::new().bg(Role::Selection);
    buf.fill(Rect::new(area.x, area.y, area.width, 1), theme.brush(&base));

    let mut x = area.x + 1;
    let mut write = |buf: &mut Buffer, text: &str, style: Style| -> (u16, u16) {
        let start = x;
        let written = buf.put_str(x, area.y, text, area.right().saturating_sub(x), theme.brush(&base.patch(style)));
        x += written;
        (start, written)
    };

    write(buf, &BulkActionsBar::summary(selected), Style::new().bold());
    write(buf, " │ ", Style::new().fg(Role::Muted));
    for (index, action) in bar.actions.iter().enumerate() {
        let style = if action.disabled {
            Style::new().fg(Role::Muted).dim()
        } else {
            action.variant.style()
        };
        let caption = format!("{} {}", index + 1, action.caption());
        let (start, width) = write(buf, &caption, style);
        layout.targets.push((BulkHit::Action(index), start, width));
        write(buf, "  ", Style::new());
    }
    write(buf, "│ ", Style::new().fg(Role::Muted));
    let (start, width) = write(buf, CLEAR_GLYPH, Style::new().fg(Role::Foreground));
    layout.targets.push((BulkHit::Clear, start, width));

    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> BulkActionsBar {
        BulkActionsBar::new(vec![
            BulkAction::new("Remove").variant(ActionVariant::Destructive),
            BulkAction::new("Archive").disabled(true),
        ])
    }

    fn selection() -> SelectionMap<&'static str> {
        let mut map = SelectionMap::new();
        map.insert("b", "Bob");
        map.insert("a", "Ann");
        map
    }

    #[test]
    fn summary_pluralizes() {
        assert_eq!(BulkActionsBar::summary(1), "1 item selected");
        assert_eq!(BulkActionsBar::summary(3), "3 items selected");
    }

    #[test]
    fn activate_passes_rows_in_selection_order() {
        let event = bar().activate(0, &selection());
        assert_eq!(
            event,
            Some(BulkEvent::Action {
                index: 0,
                rows: vec!["Bob", "Ann"]
            })
        );
    }

    #[test]
    fn disabled_missing_and_empty_are_noops() {
        assert_eq!(bar().activate(1, &selection()), None);
        assert_eq!(bar().activate(9, &selection()), None);
        assert_eq!(bar().activate(0, &SelectionMap::<&str>::new()), None);
    }

    #[test]
    fn clear_empties_the_map() {
        let mut map = selection();
        assert_eq!(bar().clear(&mut map), BulkEvent::Cleared);
        assert!(map.is_empty());
    }

    #[test]
    fn hidden_without_selection() {
        let mut buf = Buffer::new(60, 1);
        let layout = render_bulk_bar(&bar(), 0, buf.area(), &mut buf, &Theme::default());
        assert!(layout.is_empty());
        assert_eq!(buf.row_text(0).trim(), "");
    }

    #[test]
    fn render_and_hit() {
        let mut buf = Buffer::new(60, 1);
        let layout = render_bulk_bar(&bar(), 2, buf.area(), &mut buf, &Theme::default());
        let row = buf.row_text(0);
        assert!(row.starts_with(" 2 items selected │ 1 Remove  2 Archive  │ ✕"));
        let col = row.chars().position(|c| c == 'R').unwrap() as u16;
        assert_eq!(layout.hit(col, 0), Some(BulkHit::Action(0)));
        let clear = row.chars().position(|c| c == '✕').unwrap() as u16;
        assert_eq!(layout.hit(clear, 0), Some(BulkHit::Clear));
    }
}
