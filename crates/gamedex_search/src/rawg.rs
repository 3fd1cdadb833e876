//! RAWG games API client.

use crate::config::SearchConfig;
use crate::error::{SearchError, SearchResult};
use crate::provider::{SearchPage, SearchProvider, SearchQuery};
use async_trait::async_trait;
use gamedex_core::GameSummary;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Response body of `GET /api/games`.
#[derive(Debug, Deserialize)]
struct GamesResponse {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    previous: Option<String>,
    #[serde(default)]
    results: Vec<GameSummary>,
}

impl From<GamesResponse> for SearchPage {
    fn from(response: GamesResponse) -> Self {
        Self {
            results: response.results,
            count: response.count,
            has_next: response.next.is_some(),
            has_previous: response.previous.is_some(),
        }
    }
}

/// Search provider backed by the RAWG games API.
pub struct RawgClient {
    base_url: Url,
    api_key: Option<String>,
    client: Client,
}

impl RawgClient {
    /// Creates a new client from the search configuration.
    pub fn new(config: &SearchConfig) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        Self::with_client(&config.base_url, config.api_key.clone(), client)
    }

    /// Creates a new client around an existing HTTP client.
    pub fn with_client(
        base_url: &str,
        api_key: Option<String>,
        client: Client,
    ) -> SearchResult<Self> {
        // `Url::join` drops the last path segment unless the base ends in '/'
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the request URL for a query.
    pub fn request_url(&self, query: &SearchQuery) -> SearchResult<Url> {
        let key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;
        let mut url = self.base_url.join("api/games")?;
        url.query_pairs_mut()
            .append_pair("key", key)
            .append_pair("page", &query.page.to_string())
            .append_pair("page_size", &query.page_size.to_string())
            .append_pair("search", query.text.trim());
        Ok(url)
    }
}

#[async_trait]
impl SearchProvider for RawgClient {
    async fn search(&self, query: &SearchQuery) -> SearchResult<SearchPage> {
        if query.is_blank() {
            return Ok(SearchPage::empty());
        }

        let url = self.request_url(query)?;
        tracing::debug!(query = %query.text, page = query.page, "searching games");

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body: GamesResponse = response.json().await?;
        Ok(body.into())
    }
}
