//! Run orchestration: resolve, fetch and save each entity, then archive.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::archive::Archiver;
use super::fetch::{HttpImageFetcher, ImageFetcher};
use super::writer::ImageWriter;
use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::resolve::{MediaWikiClient, NameResolver, ThumbnailResolver};
use crate::slug::{find_collisions, slugify};
use crate::types::{Outcome, RunSummary, ThumbnailRecord};

/// Everything a run needs besides its resolver and fetcher.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Entity names, processed in order
    pub entities: Vec<String>,
    pub output_dir: PathBuf,
    pub archive_path: PathBuf,
    pub thumbnail_width: u32,
    /// Pause between consecutive entities
    pub pause: Duration,
}

impl RunSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            entities: config.entities.names.clone(),
            output_dir: config.output_dir(),
            archive_path: config.archive_path(),
            thumbnail_width: config.api.thumbnail_width,
            pause: config.pause(),
        }
    }
}

/// Sequential thumbnail pipeline.
///
/// Each entity is handled to completion before the next one starts, and a
/// failure on one entity never stops the run. The archive is built exactly
/// once after the last entity.
pub struct Pipeline {
    settings: RunSettings,
    resolver: Box<dyn ThumbnailResolver>,
    fetcher: Box<dyn ImageFetcher>,
    writer: ImageWriter,
    archiver: Archiver,
}

impl Pipeline {
    pub fn new(
        settings: RunSettings,
        resolver: Box<dyn ThumbnailResolver>,
        fetcher: Box<dyn ImageFetcher>,
    ) -> Self {
        let archiver = Archiver::new(settings.archive_path.clone());
        Self {
            settings,
            resolver,
            fetcher,
            writer: ImageWriter,
            archiver,
        }
    }

    /// Build a pipeline talking to the configured MediaWiki endpoint.
    ///
    /// Lookups and downloads share one HTTP client carrying the configured
    /// User-Agent.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = MediaWikiClient::from_config(config)?;
        let fetcher = HttpImageFetcher::from_config(api.http_client().clone(), config);
        Ok(Self::new(
            RunSettings::from_config(config),
            Box::new(NameResolver::new(api)),
            Box::new(fetcher),
        ))
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Resolve, fetch and save a single entity.
    ///
    /// Never fails: every problem ends up in the returned record.
    pub async fn process_entity(&self, name: &str) -> ThumbnailRecord {
        let slug = slugify(name);

        let resolved = match self
            .resolver
            .resolve(name, self.settings.thumbnail_width)
            .await
        {
            Ok(Some(resolved)) => resolved,
            Ok(None) => return ThumbnailRecord::new(name, slug, Outcome::NotFound),
            Err(e) => {
                return ThumbnailRecord::new(name, slug, Outcome::FetchFailed).with_error(e);
            }
        };

        let image = match self.fetcher.fetch(&resolved.url).await {
            Ok(image) => image,
            Err(e) => {
                return ThumbnailRecord::new(name, slug, Outcome::FetchFailed)
                    .with_source(&resolved)
                    .with_error(e);
            }
        };
        tracing::trace!(
            "  {} decoded {}x{} from {:?}",
            name,
            image.width(),
            image.height(),
            image.source_format
        );

        match self
            .writer
            .write(&image.image, &slug, &self.settings.output_dir)
        {
            Ok(saved) => {
                let mut record =
                    ThumbnailRecord::new(name, slug, Outcome::Resolved).with_source(&resolved);
                record.path = Some(saved.path);
                record.content_hash = Some(saved.content_hash);
                record
            }
            Err(e) => ThumbnailRecord::new(name, slug, Outcome::WriteFailed)
                .with_source(&resolved)
                .with_error(e),
        }
    }

    /// Run the whole entity list and archive the output directory.
    pub async fn run(&self) -> Result<RunSummary> {
        self.run_with(|_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_record` after each entity.
    ///
    /// Only a failure to create the output directory or to build the archive
    /// is returned as an error.
    pub async fn run_with<F>(&self, mut on_record: F) -> Result<RunSummary>
    where
        F: FnMut(&ThumbnailRecord),
    {
        let settings = &self.settings;
        std::fs::create_dir_all(&settings.output_dir).map_err(|source| PipelineError::Write {
            path: settings.output_dir.clone(),
            source,
        })?;

        for collision in find_collisions(&settings.entities) {
            tracing::warn!(
                "Slug collision on {:?}: {} (last one wins)",
                collision.slug,
                collision.names.join(", ")
            );
        }

        let start = Instant::now();
        let mut records = Vec::with_capacity(settings.entities.len());

        for (i, name) in settings.entities.iter().enumerate() {
            if i > 0 && !settings.pause.is_zero() {
                tokio::time::sleep(settings.pause).await;
            }

            tracing::info!("Fetching: {}", name);
            let record = self.process_entity(name).await;
            match record.outcome {
                Outcome::Resolved => tracing::info!("Saved {}.png", record.slug),
                Outcome::NotFound => tracing::warn!("No thumbnail found for {}", name),
                Outcome::FetchFailed | Outcome::WriteFailed => tracing::error!(
                    "Failed to save {}: {}",
                    record.slug,
                    record.error.as_deref().unwrap_or("unknown error")
                ),
            }

            on_record(&record);
            records.push(record);
        }

        let archive = self.archiver.archive(&settings.output_dir)?;
        let summary = RunSummary { records, archive };
        tracing::info!(
            "Done in {:.1}s: {} saved, {} not found, {} failed; archived {} file(s) to {:?}",
            start.elapsed().as_secs_f64(),
            summary.saved(),
            summary.not_found(),
            summary.failed(),
            summary.archive.entries.len(),
            summary.archive.path
        );
        Ok(summary)
    }
}
