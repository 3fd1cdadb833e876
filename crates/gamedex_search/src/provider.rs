//! Search provider abstraction.

use crate::error::SearchResult;
use async_trait::async_trait;
use gamedex_core::GameSummary;

/// One page of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text query.
    pub text: String,
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
}

impl SearchQuery {
    /// Creates a query for the first page.
    pub fn new(text: impl Into<String>, page_size: u32) -> Self {
        Self {
            text: text.into(),
            page: 1,
            page_size,
        }
    }

    /// Sets the page number. Page 0 is treated as page 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Returns true if the query has no searchable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Results of one search page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Games on this page.
    pub results: Vec<GameSummary>,
    /// Total number of matches, if the provider reports it.
    pub count: Option<u64>,
    /// Whether a next page exists.
    pub has_next: bool,
    /// Whether a previous page exists.
    pub has_previous: bool,
}

impl SearchPage {
    /// Returns an empty page.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the page has no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A source of game search results.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetches one page of results.
    async fn search(&self, query: &SearchQuery) -> SearchResult<SearchPage>;
}
