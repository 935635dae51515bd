//! The `pagethumb resolve` command: look names up without downloading.

use clap::Args;
use pagethumb_core::{Config, MediaWikiClient, NameResolver, ThumbnailResolver};

/// Arguments for the `resolve` command.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Entity names to resolve (defaults to the configured list)
    pub names: Vec<String>,

    /// Requested thumbnail width in pixels
    #[arg(short, long)]
    pub width: Option<u32>,
}

/// Execute the resolve command.
///
/// Prints one `name<TAB>tier<TAB>url` line per name. Lookup failures are
/// logged and the remaining names are still resolved.
pub async fn execute(args: ResolveArgs, config: Config) -> anyhow::Result<()> {
    let width = args.width.unwrap_or(config.api.thumbnail_width);
    if width == 0 {
        anyhow::bail!("--width must be > 0");
    }
    let names = if args.names.is_empty() {
        config.entities.names.clone()
    } else {
        args.names
    };

    let resolver = NameResolver::new(MediaWikiClient::from_config(&config)?);
    for name in &names {
        match resolver.resolve(name, width).await {
            Ok(Some(found)) => println!("{}\t{}\t{}", name, found.tier, found.url),
            Ok(None) => println!("{}\t-\tnot found", name),
            Err(e) => tracing::error!("Lookup failed for {}: {}", name, e),
        }
    }
    Ok(())
}
