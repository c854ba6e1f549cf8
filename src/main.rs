//! Feedtrawl companion CLI
//!
//! The crawl engine itself is a library: a host application constructs an
//! authenticated session driver and extractor and embeds
//! [`feedtrawl::CollectionCrawler`]. This binary is the operational
//! companion - it validates configuration files and inspects checkpoint
//! documents written by crawl runs.

use anyhow::Context;
use clap::Parser;
use feedtrawl::checkpoint::read_snapshot;
use feedtrawl::config::load_config_with_hash;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Feedtrawl: checkpoint-driven collection feed crawler
#[derive(Parser, Debug)]
#[command(name = "feedtrawl")]
#[command(version = "1.0.0")]
#[command(about = "Validate feedtrawl configs and inspect crawl checkpoints", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the config and show effective settings without touching the checkpoint
    #[arg(long, conflicts_with = "inspect")]
    dry_run: bool,

    /// Inspect the checkpoint document at the configured path (default)
    #[arg(long)]
    inspect: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
    } else {
        handle_inspect(&config)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("feedtrawl=info,warn"),
            1 => EnvFilter::new("feedtrawl=debug,info"),
            2 => EnvFilter::new("feedtrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows effective settings
fn handle_dry_run(config: &feedtrawl::Config, config_hash: &str) {
    println!("=== Feedtrawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Root scroll budget: {}", config.crawler.root_max_scrolls);
    println!(
        "  Collection scroll budget: {}",
        config.crawler.collection_max_scrolls
    );
    println!("  Settle delay: {}ms", config.crawler.settle_delay_ms);
    println!("  Stall threshold: {}", config.crawler.stall_threshold);
    println!(
        "  Inter-collection delay: {}ms",
        config.crawler.collection_delay_ms
    );
    println!(
        "  Selector timeout: {}ms",
        config.crawler.selector_timeout_ms
    );

    println!("\nCheckpoint:");
    println!("  Path: {}", config.checkpoint.path);

    println!("\nConfig hash: {}", config_hash);
    println!("\n✓ Configuration is valid");
}

/// Handles the default mode: loads the checkpoint document and prints a summary
fn handle_inspect(config: &feedtrawl::Config) -> anyhow::Result<()> {
    let path = Path::new(&config.checkpoint.path);
    println!("Checkpoint: {}\n", path.display());

    if !path.exists() {
        println!("No checkpoint document found (no crawl has completed a collection yet)");
        return Ok(());
    }

    let collections = read_snapshot(path)
        .with_context(|| format!("failed to read checkpoint at {}", path.display()))?;

    let total_items: usize = collections.iter().map(|c| c.items.len()).sum();
    println!("Collections: {}", collections.len());
    println!("Total items: {}", total_items);
    println!();

    for collection in &collections {
        println!(
            "  {} / {} (id {}): {} items",
            collection.owner,
            collection.name,
            collection.id,
            collection.items.len()
        );
    }

    let empty = collections.iter().filter(|c| c.items.is_empty()).count();
    if empty > 0 {
        println!(
            "\n{} collection(s) have no items (either genuinely empty or failed during expansion)",
            empty
        );
    }

    Ok(())
}
