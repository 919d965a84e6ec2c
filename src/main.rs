//! Scoped-Crawl main entry point
//!
//! This is the command-line interface for the depth-bounded, origin-scoped
//! crawler.

use anyhow::Context;
use clap::Parser;
use scoped_crawl::config::{load_config_with_hash, validate, Config};
use scoped_crawl::crawler::run_crawl_with_store;
use scoped_crawl::output::{load_statistics_at, print_report, print_statistics};
use scoped_crawl::storage::{open_store, VisitedStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Scoped-Crawl: a depth-bounded, origin-scoped web crawler
///
/// Fetches every seed, follows same-origin links until the depth budget is
/// spent, and records every claimed address in a durable visited set so no
/// address is fetched twice, even across runs.
#[derive(Parser, Debug)]
#[command(name = "scoped-crawl")]
#[command(version)]
#[command(about = "A depth-bounded, origin-scoped web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed URL; repeat to crawl several (replaces the configured seeds)
    #[arg(long = "seed", value_name = "URL")]
    seeds: Vec<String>,

    /// Depth budget for every seed
    #[arg(long, value_name = "N")]
    depth: Option<u32>,

    /// Maximum GET requests in flight
    #[arg(long, value_name = "N")]
    max_concurrent: Option<u32>,

    /// Path to the visited-set database
    #[arg(long, value_name = "PATH")]
    database: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Forget every previously visited address before crawling
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    fresh: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show visited-set statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(&config, cli.fresh).await?;
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
            0 => EnvFilter::new("scoped_crawl=info,warn"),
            1 => EnvFilter::new("scoped_crawl=debug,info"),
            2 => EnvFilter::new("scoped_crawl=trace,debug"),
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

/// Loads the config file (or defaults) and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if !cli.seeds.is_empty() {
        config.seeds = cli.seeds.clone();
    }
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(max) = cli.max_concurrent {
        config.crawler.max_concurrent_fetches = Some(max);
    }
    if let Some(database) = &cli.database {
        config.storage.database_path = database.clone();
    }

    validate(&config).context("invalid configuration after command-line overrides")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Scoped-Crawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    match config.crawler.max_concurrent_fetches {
        Some(max) => println!("  Max concurrent fetches: {}", max),
        None => println!("  Max concurrent fetches: unbounded"),
    }

    println!("\nHTTP:");
    println!(
        "  User agent: {}",
        config.http.user_agent.as_deref().unwrap_or("(client default)")
    );

    println!("\nStorage:");
    println!("  Database: {}", config.storage.database_path);

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.storage.database_path);

    let stats = load_statistics_at(Path::new(&config.storage.database_path))
        .context("failed to read visited-set database")?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, fresh: bool) -> anyhow::Result<()> {
    let store = open_store(Path::new(&config.storage.database_path))
        .context("failed to open visited-set database")?;

    if fresh {
        tracing::info!("Starting fresh crawl (clearing visited set)");
        store.clear().context("failed to clear visited set")?;
    } else {
        tracing::info!(
            "Starting crawl ({} addresses already visited)",
            store.count()?
        );
    }

    match run_crawl_with_store(config, Arc::new(store)).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
