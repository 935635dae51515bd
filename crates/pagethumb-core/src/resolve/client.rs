//! HTTP transport for the MediaWiki `api.php` endpoint.

use async_trait::async_trait;
use std::time::Duration;

use super::query::{PageQuery, QueryResponse};
use crate::config::Config;
use crate::error::PipelineError;

/// Something that can answer a [`PageQuery`].
///
/// The resolver only talks to this trait, so tests can swap in an
/// in-process fake and count calls per tier.
#[async_trait]
pub trait PageImageApi: Send + Sync {
    async fn query(&self, query: &PageQuery) -> Result<QueryResponse, PipelineError>;
}

/// `reqwest`-backed client for a MediaWiki API endpoint.
pub struct MediaWikiClient {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl MediaWikiClient {
    /// Build a client sending `user_agent` on every request.
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self, PipelineError> {
        let client = build_http_client(user_agent, timeout).map_err(|e| PipelineError::Network {
            url: endpoint.to_string(),
            message: format!("Failed to build HTTP client: {e}"),
            status_code: None,
        })?;
        Ok(Self::with_client(endpoint, client, timeout))
    }

    /// Wrap an existing client (shared with the image fetcher).
    pub fn with_client(endpoint: &str, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        Self::new(
            &config.api.endpoint,
            &config.api.user_agent,
            config.request_timeout(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The underlying HTTP client, for sharing with image downloads.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

#[async_trait]
impl PageImageApi for MediaWikiClient {
    async fn query(&self, query: &PageQuery) -> Result<QueryResponse, PipelineError> {
        tracing::debug!("API query: {:?}", query);
        let timeout_ms = self.timeout_ms();
        let lookup_err = |e| PipelineError::from_reqwest(&self.endpoint, "lookup", timeout_ms, e);

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&query.params())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(lookup_err)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PipelineError::Network {
                url: self.endpoint.clone(),
                message: format!("API HTTP {status}"),
                status_code: Some(status.as_u16()),
            });
        }

        resp.json::<QueryResponse>().await.map_err(lookup_err)
    }
}

/// Build the shared HTTP client: identifying User-Agent plus a default timeout.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_default_config() {
        let config = Config::default();
        let client = MediaWikiClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "https://en.wikipedia.org/w/api.php");
        assert_eq!(client.timeout_ms(), 10_000);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Port 9 on localhost is not expected to accept HTTP connections.
        let client = MediaWikiClient::new(
            "http://127.0.0.1:9/w/api.php",
            "pagethumb-tests/0",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client
            .query(&PageQuery::title("Yoda", 64))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Network { .. } | PipelineError::Timeout { .. }
        ));
    }
}
