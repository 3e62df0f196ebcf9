//! Styled text fragments.

use crate::style::{Role, Style};
use crate::text::display_width;

/// A run of text with a single style; the unit every cell renders to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new(),
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self::styled(text, Style::new().fg(Role::Muted))
    }

    pub fn width(&self) -> usize {
        display_width(&self.text)
    }
}

impl From<&str> for Span {
    fn from(text: &str) -> Self {
        Span::new(text)
    }
}

impl From<String> for Span {
    fn from(text: String) -> Self {
        Span::new(text)
    }
}
