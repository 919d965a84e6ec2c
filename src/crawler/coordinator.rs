//! Crawler coordinator - run-level orchestration
//!
//! This module wires the collaborators together for one run:
//! - Opening the visited store and making its table ready
//! - Building the shared HTTP client
//! - Crawling every seed concurrently
//! - Collecting the per-seed child sets and run counters

use crate::config::Config;
use crate::crawler::engine::{Crawler, NodeOutcome};
use crate::crawler::stats::StatsSnapshot;
use crate::storage::{open_store, VisitedStore};
use crate::{CrawlError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::{self, JoinSet};

/// Result of crawling one seed
#[derive(Debug, Clone)]
pub struct SeedReport {
    /// The seed address as supplied
    pub seed: String,
    /// What the root node produced; its children are the first hop only
    pub outcome: NodeOutcome,
}

/// Result of a whole crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// One entry per seed, in input order
    pub seeds: Vec<SeedReport>,
    /// Counters accumulated by every branch of the run
    pub stats: StatsSnapshot,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Crawls every seed concurrently with the same depth budget
///
/// All seeds share `crawler`, and through it one client and one store. The
/// call returns once every branch of every seed has terminated.
///
/// # Arguments
///
/// * `crawler` - The shared crawl context
/// * `seeds` - Seed addresses; invalid ones are rejected, not errors
/// * `depth` - Depth budget for every seed
///
/// # Returns
///
/// * `Ok(Vec<SeedReport>)` - One report per seed, in input order
/// * `Err(CrawlError)` - A fatal error in any branch; all other branches
///   are aborted
pub async fn crawl_seeds(
    crawler: &Crawler,
    seeds: &[String],
    depth: u32,
) -> Result<Vec<SeedReport>> {
    let mut tasks = JoinSet::new();
    let mut seed_of_task: HashMap<task::Id, usize> = HashMap::with_capacity(seeds.len());
    for (index, seed) in seeds.iter().enumerate() {
        let root = crawler.crawl(seed.clone(), depth);
        let handle = tasks.spawn(async move { (index, root.await) });
        seed_of_task.insert(handle.id(), index);
    }

    let mut outcomes: Vec<Option<NodeOutcome>> = vec![None; seeds.len()];

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(outcome))) => outcomes[index] = Some(outcome),
            Ok((index, Err(e))) => {
                tracing::error!("Crawl from seed {} failed: {}", seeds[index], e);
                return Err(e);
            }
            Err(source) => {
                let url = seed_of_task
                    .get(&source.id())
                    .map(|&index| seeds[index].clone())
                    .unwrap_or_default();
                tracing::error!("Crawl task for seed {} did not complete: {}", url, source);
                return Err(CrawlError::TaskJoin { url, source });
            }
        }
    }

    Ok(seeds
        .iter()
        .cloned()
        .zip(outcomes)
        .filter_map(|(seed, outcome)| outcome.map(|outcome| SeedReport { seed, outcome }))
        .collect())
}

/// Runs a crawl against an already-open visited store
///
/// # Arguments
///
/// * `config` - The crawl configuration
/// * `store` - The visited store; `table_ready` is called before crawling
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Every seed finished
/// * `Err(CrawlError)` - Storage or client setup failed, or a branch failed fatally
pub async fn run_crawl_with_store(
    config: &Config,
    store: Arc<dyn VisitedStore>,
) -> Result<CrawlReport> {
    store.table_ready()?;

    let crawler = Crawler::from_config(config, store)?;
    let start_time = Instant::now();

    tracing::info!(
        "Crawling {} seed(s) with depth budget {}",
        config.seeds.len(),
        config.crawler.max_depth
    );

    let seeds = crawl_seeds(&crawler, &config.seeds, config.crawler.max_depth).await?;
    let stats = crawler.stats();
    let elapsed = start_time.elapsed();

    tracing::info!(
        "Crawl completed: {} fetched, {} failed, {} already visited in {:?}",
        stats.fetched,
        stats.fetch_failures,
        stats.already_visited,
        elapsed
    );

    Ok(CrawlReport {
        seeds,
        stats,
        elapsed,
    })
}

/// Runs the main crawl operation
///
/// This function orchestrates the entire crawl process:
///
/// 1. Open the visited-set database named in the configuration
/// 2. Make the `urls` table ready
/// 3. Build the shared HTTP client
/// 4. Crawl every seed concurrently, each as a task tree
/// 5. Report per-seed child sets and run counters
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(CrawlError)` - Crawl failed with a fatal error
///
/// # Example
///
/// ```no_run
/// use scoped_crawl::config::load_config;
/// use scoped_crawl::crawler::run_crawl;
/// use std::collections::HashMap;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("crawl.toml"))?;
/// let report = run_crawl(&config).await?;
/// println!("{} pages fetched", report.stats.fetched);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlReport> {
    let store = open_store(Path::new(&config.storage.database_path))?;
    run_crawl_with_store(config, Arc::new(store)).await
}
