//! Error types for search.

use thiserror::Error;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while searching.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Base URL could not be parsed.
    #[error("invalid search url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No API key was configured.
    #[error("search provider api key is not configured")]
    MissingApiKey,

    /// Request did not complete.
    #[error("search transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success status.
    #[error("search provider returned status {0}")]
    Status(u16),

    /// Response body could not be decoded.
    #[error("failed to decode search response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            SearchError::Status(status.as_u16())
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}
