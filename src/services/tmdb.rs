//! TMDB transport
//!
//! The only component that talks to the network. Everything above it sees
//! decoded JSON, which keeps the response cache and the catalog service
//! testable against a mocked transport.

use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Read-only JSON GET against the movie catalog API
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetches `url` and decodes the body. Non-success statuses are errors.
    async fn get_json(&self, url: &str) -> AppResult<Value>;
}

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl CatalogTransport for TmdbClient {
    async fn get_json(&self, url: &str) -> AppResult<Value> {
        let response = self
            .http_client
            .get(url)
            .header("Accept", "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(url = %url, status = %status, "TMDB request failed");
            return Err(AppError::ExternalApi(format!(
                "TMDB request failed: {}",
                status.as_u16()
            )));
        }

        let body: Value = response.json().await?;
        tracing::debug!(url = %url, "TMDB response received");
        Ok(body)
    }
}
