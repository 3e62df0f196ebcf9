//! Paginated response envelopes.

use serde::{Deserialize, Serialize};

/// One page of a server-side listing.
///
/// Mirrors the API's `{ results, page, limit, totalPages, totalResults }` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

impl<T> Page<T> {
    /// Build a page by slicing an in-memory list. `page` is 1-based, as on the wire.
    pub fn slice(all: &[T], page: u32, limit: u32) -> Self
    where
        T: Clone,
    {
        let limit = limit.max(1);
        let page = page.max(1);
        let start = ((page - 1) as usize).saturating_mul(limit as usize);
        let results = all
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();
        Self {
            results,
            page,
            limit,
            total_pages: (all.len() as u32).div_ceil(limit),
            total_results: all.len() as u64,
        }
    }

    /// Total as the pagination control expects it.
    pub fn count(&self) -> i64 {
        self.total_results as i64
    }
}

/// Some endpoints answer with a bare array, others with a [`Page`] envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Items(Vec<T>),
    Paged(Page<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Items(items) => items,
            Listing::Paged(page) => page.results,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_uses_camel_case() {
        let page: Page<u32> = serde_json::from_value(json!({
            "results": [1, 2],
            "page": 2,
            "limit": 2,
            "totalPages": 3,
            "totalResults": 5
        }))
        .unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.count(), 5);
    }

    #[test]
    fn listing_accepts_both_shapes() {
        let bare: Listing<String> = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(bare.into_items(), vec!["a", "b"]);

        let paged: Listing<String> = serde_json::from_value(json!({
            "results": ["c"],
            "page": 1,
            "limit": 10,
            "totalPages": 1,
            "totalResults": 1
        }))
        .unwrap();
        assert_eq!(paged.into_items(), vec!["c"]);
    }

    #[test]
    fn slice_past_the_end_is_empty() {
        let all: Vec<u32> = (0..5).collect();
        let page = Page::slice(&all, 2, 2);
        assert_eq!(page.results, vec![2, 3]);
        assert_eq!(page.total_pages, 3);

        let past = Page::slice(&all, 4, 2);
        assert!(past.results.is_empty());
        assert_eq!(past.total_results, 5);
    }
}
