//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with fail-soft error handling
//! - HTML parsing and link extraction
//! - The recursive, origin-scoped crawl engine
//! - Run coordination across seeds

mod coordinator;
mod engine;
mod fetcher;
mod parser;
mod stats;

pub use coordinator::{crawl_seeds, run_crawl, run_crawl_with_store, CrawlReport, SeedReport};
pub use engine::{Crawler, NodeOutcome};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use parser::{extract_links, RawLink};
pub use stats::{CrawlStats, StatsSnapshot};
