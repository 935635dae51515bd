//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    ///
    /// Called on every load; callers that modify a loaded config should
    /// call it again.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.endpoint must not be empty".into(),
            ));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.user_agent must not be empty".into(),
            ));
        }
        if self.api.thumbnail_width == 0 {
            return Err(ConfigError::ValidationError(
                "api.thumbnail_width must be > 0".into(),
            ));
        }
        if self.limits.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.request_timeout_ms must be > 0".into(),
            ));
        }
        if self.limits.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0".into(),
            ));
        }
        if self.limits.max_download_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_download_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.run.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "run.output_dir must not be empty".into(),
            ));
        }
        if self.run.archive_path.file_name().is_none() {
            return Err(ConfigError::ValidationError(
                "run.archive_path must name a file".into(),
            ));
        }
        if self.entities.names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "entities.names must not contain blank names".into(),
            ));
        }
        Ok(())
    }
}
