//! Search session: current query text and page counter.

use crate::error::SearchResult;
use crate::provider::{SearchPage, SearchProvider, SearchQuery};

/// Tracks the query the user is typing and the page they are on.
///
/// Changing the query text resets the page to 1. The page counter never
/// drops below 1; advancing is not bounded.
pub struct SearchSession<P: SearchProvider> {
    provider: P,
    text: String,
    page: u32,
    page_size: u32,
    last_page: SearchPage,
}

impl<P: SearchProvider> SearchSession<P> {
    /// Creates a new session.
    pub fn new(provider: P, page_size: u32) -> Self {
        Self {
            provider,
            text: String::new(),
            page: 1,
            page_size,
            last_page: SearchPage::empty(),
        }
    }

    /// Returns the provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the current page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the current query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the results of the last fetch.
    pub fn results(&self) -> &SearchPage {
        &self.last_page
    }

    /// Replaces the query text and returns to the first page.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.page = 1;
    }

    /// Advances to the next page.
    pub fn next_page(&mut self) -> u32 {
        self.page = self.page.saturating_add(1);
        self.page
    }

    /// Goes back one page, stopping at page 1.
    pub fn previous_page(&mut self) -> u32 {
        self.page = self.page.saturating_sub(1).max(1);
        self.page
    }

    /// Returns the query for the current text and page.
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.text.clone(), self.page_size).with_page(self.page)
    }

    /// Fetches the current page.
    ///
    /// A blank query clears the results without calling the provider.
    pub async fn fetch(&mut self) -> SearchResult<&SearchPage> {
        let query = self.query();
        self.last_page = if query.is_blank() {
            SearchPage::empty()
        } else {
            self.provider.search(&query).await?
        };
        Ok(&self.last_page)
    }

    /// Clears the query and results.
    pub fn clear(&mut self) {
        self.text.clear();
        self.page = 1;
        self.last_page = SearchPage::empty();
    }
}
