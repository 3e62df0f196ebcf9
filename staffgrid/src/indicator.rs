//! Header sort glyphs.

use crate::sort::{SortOrder, SortState};
use crate::span::Span;
use crate::style::{Role, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Sortable but not the active sort column.
    Inactive,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn for_column(column: &str, sort: &SortState) -> Self {
        match sort.key() {
            Some(key) if key == column => match sort.order() {
                SortOrder::Asc => SortIndicator::Ascending,
                SortOrder::Desc => SortIndicator::Descending,
            },
            _ => SortIndicator::Inactive,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SortIndicator::Inactive => "↕",
            SortIndicator::Ascending => "↑",
            SortIndicator::Descending => "↓",
        }
    }

    pub fn span(self) -> Span {
        let style = match self {
            SortIndicator::Inactive => Style::new().fg(Role::Muted).dim(),
            _ => Style::new().fg(Role::Primary),
        };
        Span::styled(self.glyph(), style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_active_column_shows_direction() {
        let sort = SortState::with_default("name", SortOrder::Desc);
        assert_eq!(SortIndicator::for_column("name", &sort), SortIndicator::Descending);
        assert_eq!(SortIndicator::for_column("age", &sort), SortIndicator::Inactive);
        assert_eq!(SortIndicator::for_column("name", &SortState::new()), SortIndicator::Inactive);
    }
}
