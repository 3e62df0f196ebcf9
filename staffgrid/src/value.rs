//! Field access into caller-supplied rows.
//!
//! Columns address row fields by a dot-separated [`FieldPath`]. Rows expose
//! their fields through the [`Record`] trait; resolving a path that does not
//! exist yields [`CellValue::Missing`] instead of failing.

use std::fmt;

use crate::span::Span;

/// A dot-separated field path such as `"actor.name"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = raw.split('.').map(str::to_string).collect();
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment, or the whole path when it has no dots.
    pub fn head(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        FieldPath::new(raw)
    }
}

impl From<String> for FieldPath {
    fn from(raw: String) -> Self {
        FieldPath::new(raw)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The value found at a field path.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// The path does not exist on the row.
    #[default]
    Missing,
    /// The field exists and is explicitly null.
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Already rendered content, shown as-is.
    Styled(Span),
    /// Objects, arrays and anything else without a textual form.
    Other,
}

impl CellValue {
    /// Missing or null: the values that always sort last.
    pub fn is_nullish(&self) -> bool {
        matches!(self, CellValue::Missing | CellValue::Null)
    }

    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(CellValue::Other, CellValue::Number),
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => CellValue::Other,
        }
    }

    /// String form used when values of different kinds are compared.
    pub fn coerce_string(&self) -> String {
        match self {
            CellValue::Missing | CellValue::Other => String::new(),
            CellValue::Null => "null".to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Styled(span) => span.text.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<Span> for CellValue {
    fn from(span: Span) -> Self {
        CellValue::Styled(span)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// Integral values print without a fractional part (`30`, not `30.0`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    format!("{n}")
}

/// A row whose fields can be read by path.
pub trait Record {
    fn field(&self, path: &FieldPath) -> CellValue;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, path: &FieldPath) -> CellValue {
        (**self).field(path)
    }
}

impl Record for serde_json::Value {
    fn field(&self, path: &FieldPath) -> CellValue {
        use serde_json::Value;

        let mut current = self;
        for segment in path.segments() {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return CellValue::Missing,
            }
        }
        CellValue::from_json(current)
    }
}
