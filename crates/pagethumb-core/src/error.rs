//! Error types for the thumbnail pipeline.
//!
//! Errors are organized by stage so that a per-entity failure message names
//! what went wrong and where (URL, file path, stage).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for pagethumb operations.
#[derive(Error, Debug)]
pub enum PagethumbError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline errors, organized by stage.
///
/// A thumbnail that cannot be found is not an error; resolution reports it
/// as `Ok(None)`.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Connection failure, non-success HTTP status, or unreadable response
    #[error("Request to {url} failed: {message}")]
    Network {
        url: String,
        message: String,
        status_code: Option<u16>,
    },

    /// Operation timed out
    #[error("Timeout in {stage} stage for {target} after {timeout_ms}ms")]
    Timeout {
        target: String,
        stage: String,
        timeout_ms: u64,
    },

    /// Payload could not be decoded as a raster image
    #[error("Decode error for {url}: {message}")]
    Decode { url: String, message: String },

    /// Payload format could not be detected
    #[error("Unsupported image format for {url}")]
    UnsupportedFormat { url: String },

    /// Image dimensions exceed limit
    #[error("Image too large: {url} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        url: String,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Download exceeds the configured size limit
    #[error("Download too large: {url} (> {max_mb}MB)")]
    DownloadTooLarge { url: String, max_mb: u64 },

    /// Saving an image to disk failed
    #[error("Write failed for {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Building the output archive failed
    #[error("Archive error for {path}: {message}")]
    Archive { path: PathBuf, message: String },
}

impl PipelineError {
    /// Build a `Network` error from a reqwest failure, mapping timeouts to `Timeout`.
    pub(crate) fn from_reqwest(
        url: &str,
        stage: &str,
        timeout_ms: u64,
        err: reqwest::Error,
    ) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                target: url.to_string(),
                stage: stage.to_string(),
                timeout_ms,
            };
        }
        Self::Network {
            url: url.to_string(),
            status_code: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Convenience type alias for pagethumb results.
pub type Result<T> = std::result::Result<T, PagethumbError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_names_path() {
        let err = PipelineError::Write {
            path: PathBuf::from("thumbnails/yoda.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("yoda.png"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_pipeline_error_converts_to_top_level() {
        fn archive_step() -> Result<()> {
            let failed: PipelineResult<()> = Err(PipelineError::Archive {
                path: PathBuf::from("out.zip"),
                message: "disk full".to_string(),
            });
            failed?;
            Ok(())
        }

        let err = archive_step().unwrap_err();
        assert!(matches!(
            err,
            PagethumbError::Pipeline(PipelineError::Archive { .. })
        ));
        assert!(err.to_string().starts_with("Pipeline error:"));
    }

    #[test]
    fn test_timeout_message_names_stage() {
        let err = PipelineError::Timeout {
            target: "https://upload.example/x.jpg".to_string(),
            stage: "download".to_string(),
            timeout_ms: 10_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("download"));
        assert!(msg.contains("10000ms"));
    }
}
