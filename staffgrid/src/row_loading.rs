//! Per-row busy tracking for in-flight row actions.

use std::collections::HashSet;

/// Row keys with an action in flight. `start` and `stop` report whether anything changed.
#[derive(Debug, Clone, Default)]
pub struct RowLoading {
    ids: HashSet<String>,
}

impl RowLoading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn stop(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    pub fn is_loading(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut loading = RowLoading::new();
        assert!(loading.start("a"));
        assert!(!loading.start("a"));
        assert!(loading.is_loading("a"));
        assert!(loading.stop("a"));
        assert!(!loading.stop("a"));
        assert!(loading.is_empty());
    }
}
