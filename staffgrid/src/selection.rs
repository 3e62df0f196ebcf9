//! Caller-owned selection and the select-all state derived from it.
//!
//! The table never mutates a [`SelectionMap`]. It reads one to draw
//! checkboxes and reports the change the user asked for; the owner (usually
//! the page, shared with a bulk-actions bar) applies it.

use std::collections::HashMap;

/// Selected rows keyed by row identity, in the order they were selected.
#[derive(Debug, Clone)]
pub struct SelectionMap<T> {
    order: Vec<String>,
    rows: HashMap<String, T>,
}

impl<T> Default for SelectionMap<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            rows: HashMap::new(),
        }
    }
}

impl<T> SelectionMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.rows.get(key)
    }

    /// Insert or replace a row. Returns true when the key was not selected before.
    pub fn insert(&mut self, key: impl Into<String>, row: T) -> bool {
        let key = key.into();
        let fresh = !self.rows.contains_key(&key);
        if fresh {
            self.order.push(key.clone());
        }
        self.rows.insert(key, row);
        fresh
    }

    pub fn remove(&mut self, key: &str) -> Option<T> {
        let row = self.rows.remove(key)?;
        self.order.retain(|k| k != key);
        Some(row)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.rows.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Selected rows in selection order.
    pub fn rows(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|k| self.rows.get(k))
    }
}

impl<T: Clone> SelectionMap<T> {
    /// Select or deselect one row.
    pub fn set(&mut self, key: &str, row: &T, selected: bool) {
        if selected {
            self.insert(key, row.clone());
        } else {
            self.remove(key);
        }
    }

    /// Page-local select-all: add or remove exactly the given page rows.
    ///
    /// Keys selected on other pages are left untouched in both directions.
    /// Returns how many entries changed.
    pub fn apply_page<'a, I>(&mut self, page: I, selected: bool) -> usize
    where
        T: 'a,
        I: IntoIterator<Item = (String, &'a T)>,
    {
        let mut changed = 0;
        for (key, row) in page {
            if selected {
                if self.insert(key, row.clone()) {
                    changed += 1;
                }
            } else if self.remove(&key).is_some() {
                changed += 1;
            }
        }
        changed
    }
}

/// Header checkbox state for the rows currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectAllState {
    pub checked: bool,
    pub indeterminate: bool,
}

impl SelectAllState {
    /// Derive from the rendered page's keys. No keys means nothing can be selected.
    pub fn derive<'a, T>(keys: impl IntoIterator<Item = &'a str>, selection: &SelectionMap<T>) -> Self {
        let mut total = 0;
        let mut selected = 0;
        for key in keys {
            total += 1;
            if selection.contains(key) {
                selected += 1;
            }
        }
        if total == 0 {
            return Self::default();
        }
        Self {
            checked: selected == total,
            indeterminate: selected > 0 && selected < total,
        }
    }

    pub fn glyph(&self) -> &'static str {
        if self.checked {
            "[x]"
        } else if self.indeterminate {
            "[-]"
        } else {
            "[ ]"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(keys: &[&str]) -> Vec<(String, u32)> {
        keys.iter().enumerate().map(|(i, k)| (k.to_string(), i as u32)).collect()
    }

    #[test]
    fn insert_keeps_selection_order() {
        let mut map = SelectionMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        map.insert("b", 3);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(map.rows().copied().collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn apply_page_preserves_other_pages() {
        let mut map = SelectionMap::new();
        map.insert("p2-a", 100);
        let rows = page(&["p1-a", "p1-b"]);

        let added = map.apply_page(rows.iter().map(|(k, v)| (k.clone(), v)), true);
        assert_eq!(added, 2);
        assert!(map.contains("p2-a"));
        assert_eq!(map.len(), 3);

        let removed = map.apply_page(rows.iter().map(|(k, v)| (k.clone(), v)), false);
        assert_eq!(removed, 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["p2-a"]);
    }

    #[test]
    fn derive_counts_only_given_keys() {
        let mut map = SelectionMap::new();
        map.insert("a", ());
        map.insert("elsewhere", ());

        let partial = SelectAllState::derive(["a", "b"], &map);
        assert!(partial.indeterminate && !partial.checked);

        map.insert("b", ());
        let full = SelectAllState::derive(["a", "b"], &map);
        assert!(full.checked && !full.indeterminate);

        let empty = SelectAllState::derive(std::iter::empty::<&str>(), &map);
        assert_eq!(empty, SelectAllState::default());
    }

    #[test]
    fn glyphs() {
        assert_eq!(SelectAllState { checked: true, indeterminate: false }.glyph(), "[x]");
        assert_eq!(SelectAllState { checked: false, indeterminate: true }.glyph(), "[-]");
        assert_eq!(SelectAllState::default().glyph(), "[ ]");
    }
}
