//! Cell rendering.

use crate::span::Span;
use crate::text::is_blank;
use crate::value::{CellValue, format_number};

/// Glyph shown for empty, null, missing and non-textual values.
pub const PLACEHOLDER: &str = "—";

/// Turns a resolved field value into the span drawn in a cell.
///
/// Closures `Fn(&CellValue, &T, usize) -> Span` implement this directly; the
/// provided method is the default formatting used by columns without one.
pub trait CellRenderer<T>: Send + Sync {
    fn render(&self, value: &CellValue, _row: &T, _index: usize) -> Span {
        default_cell(value)
    }
}

impl<T, F> CellRenderer<T> for F
where
    F: Fn(&CellValue, &T, usize) -> Span + Send + Sync,
{
    fn render(&self, value: &CellValue, row: &T, index: usize) -> Span {
        self(value, row, index)
    }
}

/// The default formatting as a standalone renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl<T> CellRenderer<T> for DefaultRenderer {}

pub fn placeholder() -> Span {
    Span::muted(PLACEHOLDER)
}

/// Primitives are stringified; null, blank text and containers become the placeholder.
pub fn default_cell(value: &CellValue) -> Span {
    match value {
        CellValue::Missing | CellValue::Null | CellValue::Other => placeholder(),
        CellValue::Text(s) if is_blank(s) => placeholder(),
        CellValue::Text(s) => Span::new(s.clone()),
        CellValue::Number(n) => Span::new(format_number(*n)),
        CellValue::Bool(b) => Span::new(b.to_string()),
        CellValue::Styled(span) => span.clone(),
    }
}
