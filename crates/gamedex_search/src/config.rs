//! Configuration for search.

use std::time::Duration;

/// Default search provider URL.
pub const DEFAULT_SEARCH_URL: &str = "https://api.rawg.io/";

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Configuration for the search provider and the search session.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the provider.
    pub base_url: String,
    /// Provider API key.
    pub api_key: Option<String>,
    /// Results per page.
    pub page_size: u32,
    /// Quiet period before a typed query is sent.
    pub debounce: Duration,
    /// Request timeout.
    pub timeout: Duration,
}

impl SearchConfig {
    /// Creates a new search configuration.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the debounce quiet period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.base_url, DEFAULT_SEARCH_URL);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn config_builder() {
        let config = SearchConfig::new("http://localhost:9000/")
            .with_api_key("secret")
            .with_page_size(20)
            .with_debounce(Duration::from_millis(250));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.page_size, 20);
        assert_eq!(config.debounce, Duration::from_millis(250));
    }
}
