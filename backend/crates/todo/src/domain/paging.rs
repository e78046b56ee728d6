//! Paging Value Objects

use serde::Deserialize;

/// Default page size when the caller does not send `take`
pub const DEFAULT_TAKE: i64 = 50;

/// Paging parameters, including the optional search term
///
/// Deserializes straight from the query string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRequest {
    /// Case-insensitive substring filter over list names and label names
    pub search: Option<String>,
    pub skip: i64,
    pub take: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            search: None,
            skip: 0,
            take: DEFAULT_TAKE,
        }
    }
}

impl PageRequest {
    /// The search term, or `None` when absent or blank
    pub fn search_term(&self) -> Option<&str> {
        match self.search.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(term) => Some(term),
        }
    }

    /// Skip clamped to zero
    pub fn skip(&self) -> i64 {
        self.skip.max(0)
    }

    /// Take clamped to zero
    pub fn take(&self) -> i64 {
        self.take.max(0)
    }
}

/// One page of results
///
/// `total` counts all matches before paging was applied.
#[derive(Debug, Clone)]
pub struct PagedResult<T> {
    pub page_content: Vec<T>,
    pub start_index: i64,
    pub total: i64,
}
