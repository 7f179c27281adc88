//! Wiki-Ripple main entry point
//!
//! This is the command-line driver for the Wiki-Ripple crawler. It constructs
//! a crawl controller from configuration, loops over crawl steps with an
//! explicit stopping policy, and optionally reports term counts afterwards.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wiki_ripple::config::{load_config_with_hash, Config};
use wiki_ripple::crawler::{CrawlController, CrawlMode, StepOutcome};
use wiki_ripple::index::{Index, SqliteIndex};
use wiki_ripple::url::LinkFilter;
use wiki_ripple::{RippleError, WikiFetcher};

/// Wiki-Ripple: a breadth-first wiki crawler and term indexer
///
/// Wiki-Ripple walks a wiki-style site breadth-first from a seed page,
/// indexes each page's paragraph text into a searchable term index, and
/// follows internal links until its step or page budget runs out.
#[derive(Parser, Debug)]
#[command(name = "wiki-ripple")]
#[command(version = "1.0.0")]
#[command(about = "A breadth-first wiki crawler and term indexer", long_about = None)]
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

    /// Crawl from recorded snapshots, re-indexing unconditionally
    #[arg(long, conflicts_with = "live")]
    replay: bool,

    /// Crawl over the network, skipping already-indexed pages
    #[arg(long, conflicts_with = "replay")]
    live: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// After the crawl, print this term's occurrence counts per URL
    #[arg(long, value_name = "TERM")]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // CLI flags override the configured mode
    let mode = if cli.replay {
        CrawlMode::Replay
    } else if cli.live {
        CrawlMode::Live
    } else {
        config.crawl.mode
    };

    if cli.dry_run {
        handle_dry_run(&config, mode);
        return Ok(());
    }

    handle_crawl(config, mode, cli.query.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_ripple=info,warn"),
            1 => EnvFilter::new("wiki_ripple=debug,info"),
            2 => EnvFilter::new("wiki_ripple=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, mode: CrawlMode) {
    println!("=== Wiki-Ripple Dry Run ===\n");

    println!("Crawl:");
    println!("  Seed URL: {}", config.crawl.seed_url);
    println!("  Domain marker: {}", config.crawl.domain_marker);
    println!("  Mode: {:?}", mode);
    println!("  Max steps: {}", config.crawl.max_steps);
    println!("  Max pages: {}", config.crawl.max_pages);

    println!("\nFetch:");
    println!("  Snapshot dir: {}", config.fetch.snapshot_dir);
    println!("  Content selector: {}", config.fetch.content_selector);
    println!("  Record snapshots: {}", config.fetch.record_snapshots);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nIndex:");
    println!("  Database: {}", config.index.database_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, mode: CrawlMode, query: Option<&str>) -> anyhow::Result<()> {
    let index = SqliteIndex::new(Path::new(&config.index.database_path))
        .with_context(|| format!("Failed to open index at {}", config.index.database_path))?;
    let fetcher = WikiFetcher::new(&config.fetch, &config.user_agent)?;
    let filter = LinkFilter::new(config.crawl.domain_marker.clone());

    let mut controller =
        CrawlController::new(config.crawl.seed_url.clone(), fetcher, index, filter);

    tracing::info!("Starting {:?} crawl from {}", mode, controller.source());

    let mut steps = 0u32;
    let mut processed = 0u32;
    let mut skipped = 0u32;
    let mut failed = 0u32;

    // Stopping policy lives here, not in the controller: the crawl ends when
    // the frontier drains or a budget runs out.
    while controller.frontier_size() > 0
        && steps < config.crawl.max_steps
        && processed < config.crawl.max_pages
    {
        steps += 1;

        match controller.crawl_step(mode).await {
            Ok(StepOutcome::Processed(url)) => {
                processed += 1;
                tracing::info!("Indexed {}", url);
            }
            Ok(StepOutcome::Skipped(url)) => {
                skipped += 1;
                tracing::debug!("Skipped already indexed {}", url);
            }
            Err(RippleError::Fetch(e)) => {
                // The popped URL is lost; the crawl itself keeps going.
                failed += 1;
                tracing::warn!("{}", e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        "Crawl finished: {} steps, {} indexed, {} skipped, {} failed, {} still queued",
        steps,
        processed,
        skipped,
        failed,
        controller.frontier_size()
    );

    if let Some(term) = query {
        print_term_report(controller.index(), term)?;
    }

    Ok(())
}

/// Prints a term's occurrence counts, highest first
fn print_term_report(index: &SqliteIndex, term: &str) -> anyhow::Result<()> {
    let counts = index
        .get_counts(term)
        .with_context(|| format!("Failed to query counts for '{}'", term))?;

    if counts.is_empty() {
        println!("No occurrences of '{}' indexed", term);
        return Ok(());
    }

    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    println!("Occurrences of '{}':", term);
    for (url, count) in entries {
        println!("{:>8}  {}", count, url);
    }

    Ok(())
}
