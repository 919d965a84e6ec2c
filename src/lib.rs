//! Scoped-Crawl: a depth-bounded, origin-scoped web crawler
//!
//! Starting from a set of seed addresses, the crawler fetches each page,
//! extracts anchor links, resolves them against the page address and
//! recursively visits every same-origin link until the depth budget runs out.
//! A durable visited set guarantees that each address is fetched at most once
//! for the lifetime of the store.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
///
/// Only conditions with no local recovery end up here. Bad addresses and
/// failed fetches are handled inside the crawl engine and never surface as
/// errors.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Crawl task for {url} did not complete: {source}")]
    TaskJoin {
        url: String,
        source: tokio::task::JoinError,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, CrawlReport, Crawler, NodeOutcome};
pub use state::NodeState;
pub use storage::{SqliteStore, VisitedStore};
pub use url::{base_of, normalize, same_origin, Origin};
