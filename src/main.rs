//! Casa-Scraper main entry point
//!
//! This is the command-line interface for the listing scraper.

use anyhow::Context;
use casa_scraper::config::{load_config_with_hash, load_default, Config};
use casa_scraper::crawler::crawl;
use casa_scraper::storage::open_storage;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Casa-Scraper: a polite real-estate listing scraper
///
/// Casa-Scraper walks a listing catalog page by page, collects every
/// listing URL and scrapes each listing into `products.json`. Interrupted
/// runs resume from the saved checkpoint files.
#[derive(Parser, Debug)]
#[command(name = "casa-scraper")]
#[command(version = "1.0.0")]
#[command(about = "A polite real-estate listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Delete saved checkpoints and start from the first catalog page
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    fresh: bool,

    /// Validate config and show what would be scraped without scraping
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics about the saved checkpoints and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // PROXIES and CATALOG_URL may live in a .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            load_default().context("Invalid default configuration")?
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("casa_scraper=info,warn"),
            1 => EnvFilter::new("casa_scraper=debug,info"),
            2 => EnvFilter::new("casa_scraper=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Casa-Scraper Dry Run ===\n");

    println!("Site:");
    println!("  Catalog: {}", config.site.catalog_url);

    println!("\nRequests:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Delay before each request: {}ms", config.http.request_delay_ms);
    println!("  Cooldown after 404: {}ms", config.http.not_found_cooldown_ms);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Proxies ({}):", config.http.proxies.len());
    for proxy in &config.http.proxies {
        println!("    - {}", proxy);
    }

    println!("\nRetry:");
    println!("  Max attempts: {}", config.retry.max_attempts);
    println!(
        "  Backoff: {}ms .. {}ms",
        config.retry.initial_backoff_ms, config.retry.max_backoff_ms
    );
    println!("  Max 404 answers per fetch: {}", config.retry.max_not_found);

    println!("\nCheckpoints:");
    println!("  Catalog pages: {}", config.output.catalog_pages_path);
    println!("  Listing URLs: {}", config.output.product_urls_path);
    println!("  Records: {}", config.output.products_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: summarizes the checkpoint files
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use casa_scraper::output::{load_statistics, print_statistics};

    let store = open_storage(&config.output);
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, fresh: bool) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh crawl (removing saved checkpoints)");
        open_storage(&config.output).reset()?;
    } else {
        tracing::info!("Starting crawl (will resume from saved checkpoints)");
    }

    tracing::info!("Proxies configured: {}", config.http.proxies.len());

    match crawl(config).await {
        Ok(summary) => {
            tracing::info!(
                "Crawl completed: {} scraped, {} dropped, {} records saved",
                summary.scraped,
                summary.dropped,
                summary.total_records
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
