//! pagethumb CLI - fetch encyclopedia page thumbnails and bundle them into a zip.
//!
//! # Usage
//!
//! ```bash
//! # Fetch the configured entity list into thumbnails/ and starwars_thumbnails.zip
//! pagethumb run
//!
//! # Different locations, with a JSON Lines report
//! pagethumb run --output-dir ./out --archive ./out.zip --report run.jsonl --format jsonl
//!
//! # Check what a name resolves to
//! pagethumb resolve "Rey (Star Wars)" Yoda
//!
//! # View configuration
//! pagethumb config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// pagethumb - fetch encyclopedia page thumbnails as PNG and zip them.
#[derive(Parser, Debug)]
#[command(name = "pagethumb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "PAGETHUMB_CONFIG")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch thumbnails for every configured entity and build the archive
    Run(cli::run::RunArgs),

    /// Resolve names to thumbnail URLs without downloading anything
    Resolve(cli::resolve::ResolveArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) if cli.config.is_some() => return Err(e),
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `pagethumb config path`."
            );
            pagethumb_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("pagethumb v{}", pagethumb_core::VERSION);

    match cli.command {
        Commands::Run(args) => cli::run::execute(args, config).await,
        Commands::Resolve(args) => cli::resolve::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config, cli.config.as_deref()).await,
    }
}
