//! Sort state and the strategies that apply it.
//!
//! Header clicks drive a small state machine:
//!
//! | state           | click same column | click other column |
//! |-----------------|-------------------|--------------------|
//! | unsorted        | ascending         | ascending          |
//! | ascending(C)    | descending(C)     | ascending(D)       |
//! | descending(C)   | ascending(C)      | ascending(D)       |
//!
//! Whether the table reorders rows itself is decided once, at construction,
//! by picking [`LocalSort`] or [`DelegatedSort`].

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{CellValue, FieldPath, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named view of a [`SortState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortPhase {
    Unsorted,
    Ascending(String),
    Descending(String),
}

/// Current sort column (if any) and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    key: Option<String>,
    order: SortOrder,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start sorted by `key`; an empty key starts unsorted.
    pub fn with_default(key: impl Into<String>, order: SortOrder) -> Self {
        let key = key.into();
        Self {
            key: (!key.is_empty()).then_some(key),
            order,
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn phase(&self) -> SortPhase {
        match (&self.key, self.order) {
            (None, _) => SortPhase::Unsorted,
            (Some(key), SortOrder::Asc) => SortPhase::Ascending(key.clone()),
            (Some(key), SortOrder::Desc) => SortPhase::Descending(key.clone()),
        }
    }

    /// Apply a header click on `key` and return the new direction.
    pub fn click(&mut self, key: &str) -> SortOrder {
        let order = if self.key.as_deref() == Some(key) && self.order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        self.key = Some(key.to_string());
        self.order = order;
        order
    }

    /// Copy externally owned sort values in. `None` leaves the field untouched;
    /// `Some("")` clears the key.
    pub fn mirror(&mut self, key: Option<&str>, order: Option<SortOrder>) {
        if let Some(key) = key {
            self.key = (!key.is_empty()).then(|| key.to_string());
        }
        if let Some(order) = order {
            self.order = order;
        }
    }
}

/// Compare two field values for sorting.
///
/// Null and missing values go last in both directions; text compares
/// case-insensitively, numbers numerically, mixed kinds by their string form.
pub fn compare_values(a: &CellValue, b: &CellValue, order: SortOrder) -> Ordering {
    match (a.is_nullish(), b.is_nullish()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = compare_present(a, b);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        }
    }
}

fn compare_present(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (CellValue::Number(a), CellValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        _ => a.coerce_string().cmp(&b.coerce_string()),
    }
}

/// Decides the order rows are rendered in.
pub trait SortingStrategy<T>: Send + Sync {
    /// Indices into `rows`, in render order. Never reorders `rows` itself.
    fn arrange(&self, rows: &[T], sort: &SortState) -> Vec<usize>;

    /// Whether the caller re-supplies already sorted rows.
    fn is_delegated(&self) -> bool {
        false
    }
}

/// The table sorts the current page itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSort;

impl<T: Record> SortingStrategy<T> for LocalSort {
    fn arrange(&self, rows: &[T], sort: &SortState) -> Vec<usize> {
        let mut order: Vec<usize> = (0..rows.len()).collect();
        let Some(key) = sort.key() else {
            return order;
        };

        let path = FieldPath::new(key);
        let values: Vec<CellValue> = rows.iter().map(|row| row.field(&path)).collect();
        // stable: equal keys keep their input order
        order.sort_by(|&a, &b| compare_values(&values[a], &values[b], sort.order()));
        order
    }
}

/// The caller owns ordering; rows render exactly as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelegatedSort;

impl<T> SortingStrategy<T> for DelegatedSort {
    fn arrange(&self, rows: &[T], _sort: &SortState) -> Vec<usize> {
        (0..rows.len()).collect()
    }

    fn is_delegated(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn click_cycle_on_one_column() {
        let mut state = SortState::new();
        assert_eq!(state.phase(), SortPhase::Unsorted);
        state.click("name");
        assert_eq!(state.phase(), SortPhase::Ascending("name".into()));
        state.click("name");
        assert_eq!(state.phase(), SortPhase::Descending("name".into()));
        state.click("name");
        assert_eq!(state.phase(), SortPhase::Ascending("name".into()));
    }

    #[test]
    fn switching_column_resets_to_ascending() {
        let mut state = SortState::with_default("name", SortOrder::Desc);
        assert_eq!(state.click("age"), SortOrder::Asc);
        assert_eq!(state.phase(), SortPhase::Ascending("age".into()));
    }

    #[test]
    fn empty_default_key_is_unsorted() {
        assert_eq!(SortState::with_default("", SortOrder::Desc).phase(), SortPhase::Unsorted);
    }

    #[test]
    fn mirror_only_touches_supplied_fields() {
        let mut state = SortState::with_default("name", SortOrder::Asc);
        state.mirror(None, Some(SortOrder::Desc));
        assert_eq!(state.phase(), SortPhase::Descending("name".into()));
        state.mirror(Some(""), None);
        assert_eq!(state.phase(), SortPhase::Unsorted);
    }

    #[test]
    fn nulls_last_in_both_directions() {
        let null = CellValue::Null;
        let thirty = CellValue::Number(30.0);
        assert_eq!(compare_values(&null, &thirty, SortOrder::Asc), Ordering::Greater);
        assert_eq!(compare_values(&null, &thirty, SortOrder::Desc), Ordering::Greater);
        assert_eq!(compare_values(&CellValue::Missing, &null, SortOrder::Asc), Ordering::Equal);
    }

    #[test]
    fn text_compares_case_insensitively() {
        let ann = CellValue::Text("ann".into());
        let bob = CellValue::Text("Bob".into());
        assert_eq!(compare_values(&ann, &bob, SortOrder::Asc), Ordering::Less);
        assert_eq!(compare_values(&ann, &bob, SortOrder::Desc), Ordering::Greater);
    }

    #[test]
    fn numbers_compare_numerically() {
        let nine = CellValue::Number(9.0);
        let ten = CellValue::Number(10.0);
        assert_eq!(compare_values(&nine, &ten, SortOrder::Asc), Ordering::Less);
    }

    #[test]
    fn local_sort_is_stable_and_leaves_rows_alone() {
        let rows = vec![
            json!({ "id": "a", "team": "ops" }),
            json!({ "id": "b", "team": "Dev" }),
            json!({ "id": "c", "team": "OPS" }),
        ];
        let snapshot = rows.clone();
        let order = LocalSort.arrange(&rows, &SortState::with_default("team", SortOrder::Asc));
        assert_eq!(order, vec![1, 0, 2]);
        assert_eq!(rows, snapshot);
    }

    #[test]
    fn delegated_sort_keeps_input_order() {
        let rows = vec![json!({ "n": 3 }), json!({ "n": 1 }), json!({ "n": 2 })];
        let order = DelegatedSort.arrange(&rows, &SortState::with_default("n", SortOrder::Asc));
        assert_eq!(order, vec![0, 1, 2]);
    }
}
