//! Configuration for the sync engine.

use gamedex_sync_protocol::PLACEHOLDER_IMAGE;
use std::time::Duration;

/// Default remote catalog service URL.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Configuration for sync operations.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the remote catalog service.
    pub server_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Image sent for entries without a cover image.
    pub placeholder_image: String,
}

impl SyncConfig {
    /// Creates a new sync configuration.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            timeout: Duration::from_secs(30),
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the placeholder image URL.
    pub fn with_placeholder_image(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image = url.into();
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.placeholder_image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn sync_config_builder() {
        let config = SyncConfig::new("https://catalog.example.com")
            .with_timeout(Duration::from_secs(5))
            .with_placeholder_image("https://img.example.com/none.png");

        assert_eq!(config.server_url, "https://catalog.example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.placeholder_image, "https://img.example.com/none.png");
    }
}
