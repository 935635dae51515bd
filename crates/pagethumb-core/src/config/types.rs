//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Built-in entity list used when the config does not name any.
pub const DEFAULT_ENTITIES: &[&str] = &[
    "Luke Skywalker",
    "Han Solo",
    "Leia Organa",
    "Chewbacca",
    "R2-D2",
    "C-3PO",
    "Darth Vader",
    "Yoda",
    "Obi-Wan Kenobi",
    "Rey (Star Wars)",
    "Lando Calrissian",
    "Padmé Amidala",
    "Mace Windu",
    "Qui-Gon Jinn",
    "Anakin Skywalker",
    "Palpatine",
    "Boba Fett",
    "Jabba the Hutt",
    "Kylo Ren",
    "Finn (Star Wars)",
];

/// Upstream encyclopedia API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// MediaWiki `api.php` endpoint
    pub endpoint: String,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// Requested thumbnail width in pixels
    pub thumbnail_width: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
            user_agent: format!(
                "pagethumb/{} (https://github.com/pagethumb/pagethumb)",
                env!("CARGO_PKG_VERSION")
            ),
            thumbnail_width: 256,
        }
    }
}

/// Timeouts and size limits for network and decode work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Per-request timeout for API lookups and image downloads
    pub request_timeout_ms: u64,

    /// Decode timeout in milliseconds
    pub decode_timeout_ms: u64,

    /// Maximum downloaded image size in megabytes
    pub max_download_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10_000,
            decode_timeout_ms: 5_000,
            max_download_mb: 20,
            max_image_dimension: 10_000,
        }
    }
}

/// Where a run writes its outputs, and how fast it goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory receiving `<slug>.png` files
    pub output_dir: PathBuf,

    /// Zip archive written at the end of the run
    pub archive_path: PathBuf,

    /// Pause between entities in milliseconds
    pub pause_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("thumbnails"),
            archive_path: PathBuf::from("starwars_thumbnails.zip"),
            pause_ms: 500,
        }
    }
}

/// The ordered list of entities to look up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitiesConfig {
    pub names: Vec<String>,
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self {
            names: DEFAULT_ENTITIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: pretty or json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
