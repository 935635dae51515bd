//! Configuration management for pagethumb.
//!
//! Configuration is loaded from the platform config directory with defaults
//! that reproduce a plain run: the built-in entity list, 256px thumbnails,
//! `thumbnails/` as output directory and `starwars_thumbnails.zip` as archive.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream API settings
    pub api: ApiConfig,

    /// Timeouts and size limits
    pub limits: LimitsConfig,

    /// Output locations and pacing
    pub run: RunConfig,

    /// Entities to fetch
    pub entities: EntitiesConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.pagethumb.pagethumb/config.toml
    /// - Linux: ~/.config/pagethumb/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\pagethumb\config\config.toml
    ///
    /// Falls back to ~/.pagethumb/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "pagethumb", "pagethumb")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".pagethumb").join("config.toml")
            })
    }

    /// Output directory with `~` expanded.
    pub fn output_dir(&self) -> PathBuf {
        expand_path(&self.run.output_dir)
    }

    /// Archive path with `~` expanded.
    pub fn archive_path(&self) -> PathBuf {
        expand_path(&self.run.archive_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.limits.request_timeout_ms)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.run.pause_ms)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.thumbnail_width, 256);
        assert_eq!(config.limits.request_timeout_ms, 10_000);
        assert_eq!(config.run.pause_ms, 500);
        assert_eq!(config.entities.names.len(), 20);
        assert_eq!(config.entities.names[7], "Yoda");
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[api]"));
        assert!(toml.contains("[run]"));
        assert!(toml.contains("[entities]"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [run]
            output_dir = "out"

            [entities]
            names = ["Yoda", "Boba Fett"]
            "#,
        )
        .unwrap();
        assert_eq!(config.run.output_dir, PathBuf::from("out"));
        assert_eq!(config.run.pause_ms, 500);
        assert_eq!(config.entities.names, vec!["Yoda", "Boba Fett"]);
        assert_eq!(config.api.thumbnail_width, 256);
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        let err = Config::from_toml("[api]\nthumbnail_width = 0\n").unwrap_err();
        assert!(err.to_string().contains("thumbnail_width"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[run]\npause_ms = 0\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.pause(), Duration::ZERO);
    }

    #[test]
    fn test_tilde_expansion() {
        let mut config = Config::default();
        config.run.output_dir = PathBuf::from("~/thumbs");
        assert!(!config.output_dir().to_string_lossy().starts_with('~'));
    }
}
