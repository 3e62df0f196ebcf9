//! Listing query parameters.

/// Sort direction as the API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Query for a paginated listing endpoint.
///
/// `page` is 1-based on the wire. Empty values are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<(String, Direction)>,
    pub role: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort_by(mut self, key: impl Into<String>, direction: Direction) -> Self {
        self.sort_by = Some((key.into(), direction));
        self
    }

    /// Comma-separated role filter.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(role) = self.role.as_deref().filter(|r| !r.is_empty()) {
            pairs.push(("role", role.to_string()));
        }
        if let Some((key, direction)) = &self.sort_by {
            if !key.is_empty() {
                pairs.push(("sortBy", format!("{}:{}", key, direction.as_str())));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_query() {
        let query = ListQuery::new()
            .page(3)
            .limit(25)
            .search("ann")
            .sort_by("user.name", Direction::Desc);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page", "3".to_string()),
                ("limit", "25".to_string()),
                ("search", "ann".to_string()),
                ("sortBy", "user.name:desc".to_string()),
            ]
        );
    }

    #[test]
    fn blank_values_are_omitted() {
        let query = ListQuery::new().search("   ").role("").sort_by("", Direction::Asc);
        assert!(query.to_pairs().is_empty());
    }
}
