//! pagethumb core - encyclopedia page thumbnails as PNG, bundled into a zip.
//!
//! For each entity name the pipeline looks up a page-image thumbnail on a
//! MediaWiki API, downloads it, normalizes it to RGBA and saves it as
//! `<slug>.png`. After the last entity the output directory is zipped.
//!
//! # Architecture
//!
//! ```text
//! name → NameResolver (title, then search) → ImageFetcher → ImageWriter
//!                                                   ... repeated per entity
//! output dir → Archiver → archive.zip
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use pagethumb_core::{Config, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> pagethumb_core::Result<()> {
//!     let config = Config::load()?;
//!     let pipeline = Pipeline::from_config(&config)?;
//!     let summary = pipeline.run().await?;
//!     println!("{} saved", summary.saved());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod resolve;
pub mod slug;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, PagethumbError, PipelineError, PipelineResult, Result};
pub use output::{ReportFormat, ReportWriter};
pub use pipeline::{
    Archiver, HttpImageFetcher, ImageFetcher, ImageWriter, NormalizedImage, Pipeline, RunSettings,
};
pub use resolve::{MediaWikiClient, NameResolver, PageImageApi, ThumbnailResolver};
pub use slug::slugify;
pub use types::{
    ArchiveSummary, Outcome, ResolutionTier, ResolvedThumbnail, RunSummary, ThumbnailRecord,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
