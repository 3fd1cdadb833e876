//! HTTP transport implementation.
//!
//! Talks JSON to the remote catalog service over `reqwest`.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::transport::CatalogTransport;
use async_trait::async_trait;
use gamedex_core::RemoteId;
use gamedex_sync_protocol::{CreatedGame, Endpoint, GamePayload, Method};
use parking_lot::RwLock;

/// HTTP-based catalog transport.
pub struct HttpTransport {
    /// Base URL of the catalog service (e.g., "http://localhost:8080").
    base_url: String,
    /// HTTP client.
    client: reqwest::Client,
    /// Last error message.
    last_error: RwLock<Option<String>>,
}

impl HttpTransport {
    /// Creates a new HTTP transport from the sync configuration.
    pub fn new(config: &SyncConfig) -> SyncResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SyncError::transport_fatal(format!("failed to build client: {e}")))?;
        Ok(Self::with_client(config.server_url.clone(), client))
    }

    /// Creates a new HTTP transport around an existing client.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            last_error: RwLock::new(None),
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the last error message.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    fn set_error(&self, err: &SyncError) {
        *self.last_error.write() = Some(err.to_string());
    }

    fn clear_error(&self) {
        *self.last_error.write() = None;
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        payload: Option<&GamePayload>,
    ) -> SyncResult<reqwest::Response> {
        let url = endpoint.url(&self.base_url);
        let builder = match endpoint.method() {
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match payload {
            Some(payload) => {
                let body = payload
                    .encode()
                    .map_err(|e| SyncError::Protocol(format!("failed to encode payload: {e}")))?;
                builder
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(body)
            }
            None => builder,
        };

        tracing::debug!(%endpoint, "sending request");
        let result = match builder.send().await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => Err(SyncError::Status {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            }),
            Err(e) => Err(map_reqwest_error(&endpoint, e)),
        };

        match &result {
            Ok(_) => self.clear_error(),
            Err(err) => self.set_error(err),
        }
        result
    }
}

fn map_reqwest_error(endpoint: &Endpoint, e: reqwest::Error) -> SyncError {
    let message = format!("{endpoint}: {e}");
    if e.is_timeout() || e.is_connect() || e.is_request() {
        SyncError::transport_retryable(message)
    } else {
        SyncError::transport_fatal(message)
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn create(&self, payload: &GamePayload) -> SyncResult<CreatedGame> {
        let response = self.send(Endpoint::Create, Some(payload)).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(&Endpoint::Create, e))?;
        CreatedGame::decode(&body)
            .map_err(|e| SyncError::Protocol(format!("failed to decode create response: {e}")))
    }

    async fn update(&self, id: RemoteId, payload: &GamePayload) -> SyncResult<()> {
        self.send(Endpoint::Update(id), Some(payload)).await?;
        Ok(())
    }

    async fn delete(&self, id: RemoteId) -> SyncResult<()> {
        self.send(Endpoint::Delete(id), None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedex_core::{ExternalId, Rating};
    use std::time::Duration;

    #[test]
    fn transport_creation() {
        let config = SyncConfig::new("http://catalog.example.com");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "http://catalog.example.com");
        assert!(transport.last_error().is_none());
    }

    #[tokio::test]
    async fn unreachable_server_is_retryable() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let config = SyncConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
        let transport = HttpTransport::new(&config).unwrap();

        let payload = GamePayload {
            rawg_id: ExternalId::new(1),
            name: "x".into(),
            description: String::new(),
            rating: Rating::ZERO,
            image: String::new(),
        };
        let err = transport.create(&payload).await.unwrap_err();
        assert!(err.is_network_failure());
        assert!(err.is_retryable());
        assert!(transport.last_error().unwrap().contains("/Game/criar"));
    }
}
