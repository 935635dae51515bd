//! Thumbnail download: URL to [`NormalizedImage`].

use async_trait::async_trait;
use futures_util::StreamExt;
use std::time::Duration;

use super::decode::{ImageDecoder, NormalizedImage};
use crate::config::{Config, LimitsConfig};
use crate::error::PipelineError;

/// Retrieves an image and normalizes it to RGBA.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<NormalizedImage, PipelineError>;
}

/// Fetcher downloading over HTTP with a single attempt per URL.
pub struct HttpImageFetcher {
    client: reqwest::Client,
    decoder: ImageDecoder,
    timeout: Duration,
    max_bytes: u64,
    max_mb: u64,
}

impl HttpImageFetcher {
    pub fn new(client: reqwest::Client, limits: LimitsConfig) -> Self {
        Self {
            client,
            timeout: Duration::from_millis(limits.request_timeout_ms),
            max_bytes: limits.max_download_mb.saturating_mul(1024 * 1024),
            max_mb: limits.max_download_mb,
            decoder: ImageDecoder::new(limits),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(client, config.limits.clone())
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// Download the full body, refusing anything over the size limit.
    async fn download(&self, url: &str) -> Result<Vec<u8>, PipelineError> {
        let timeout_ms = self.timeout_ms();
        let download_err = |e| PipelineError::from_reqwest(url, "download", timeout_ms, e);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(download_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Network {
                url: url.to_string(),
                message: format!("Download HTTP {status}"),
                status_code: Some(status.as_u16()),
            });
        }

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes)
        {
            return Err(PipelineError::DownloadTooLarge {
                url: url.to_string(),
                max_mb: self.max_mb,
            });
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(download_err)?;
            if bytes.len() as u64 + chunk.len() as u64 > self.max_bytes {
                return Err(PipelineError::DownloadTooLarge {
                    url: url.to_string(),
                    max_mb: self.max_mb,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        tracing::trace!("  Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes)
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<NormalizedImage, PipelineError> {
        let bytes = self.download(url).await?;
        self.decoder.decode(bytes, url).await
    }
}
