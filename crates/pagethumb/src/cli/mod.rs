//! CLI command implementations.

pub mod config;
pub mod resolve;
pub mod run;

use pagethumb_core::Config;
use std::path::Path;

/// Load config from `--config` if given, otherwise the default location.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .map_err(|e| anyhow::anyhow!("{e}\n  (config file: {})", path.display()))?,
        None => Config::load()?,
    };
    Ok(config)
}
