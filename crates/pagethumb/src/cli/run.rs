//! The `pagethumb run` command.

use clap::{Args, ValueEnum};
use pagethumb_core::{Config, Pipeline, ReportFormat, ReportWriter, ThumbnailRecord};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Report output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportKind {
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<ReportKind> for ReportFormat {
    fn from(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Json => ReportFormat::Json,
            ReportKind::Jsonl => ReportFormat::JsonLines,
        }
    }
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory receiving the PNG files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Zip archive to write at the end
    #[arg(short, long)]
    pub archive: Option<PathBuf>,

    /// Requested thumbnail width in pixels
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Pause between entities in milliseconds
    #[arg(long)]
    pub pause_ms: Option<u64>,

    /// Write a per-entity report to this file
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportKind,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Apply command-line overrides on top of the loaded config and re-validate it.
pub fn apply_overrides(config: &mut Config, args: &RunArgs) -> anyhow::Result<()> {
    if let Some(dir) = &args.output_dir {
        config.run.output_dir = dir.clone();
    }
    if let Some(archive) = &args.archive {
        config.run.archive_path = archive.clone();
    }
    if let Some(width) = args.width {
        config.api.thumbnail_width = width;
    }
    if let Some(pause) = args.pause_ms {
        config.run.pause_ms = pause;
    }
    config.validate()?;
    Ok(())
}

/// Execute the run command.
pub async fn execute(args: RunArgs, mut config: Config) -> anyhow::Result<()> {
    apply_overrides(&mut config, &args)?;

    let pipeline = Pipeline::from_config(&config)?;
    let total = pipeline.settings().entities.len() as u64;
    tracing::info!(
        "Fetching {} thumbnail(s) into {:?}",
        total,
        pipeline.settings().output_dir
    );

    let progress = (!args.no_progress).then(|| create_progress_bar(total));
    let summary = pipeline
        .run_with(|record: &ThumbnailRecord| {
            if let Some(pb) = &progress {
                pb.set_message(record.name.clone());
                pb.inc(1);
            }
        })
        .await?;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if let Some(path) = &args.report {
        let file = File::create(path)?;
        let mut writer = ReportWriter::new(BufWriter::new(file), args.format.into());
        writer.write_records(&summary.records)?;
        writer.flush()?;
        tracing::info!(
            "Report written to {:?} ({} record(s))",
            path,
            writer.records_written()
        );
    }

    println!(
        "Done. {} saved, {} not found, {} failed. Created {}",
        summary.saved(),
        summary.not_found(),
        summary.failed(),
        summary.archive.path.display()
    );
    Ok(())
}

fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
