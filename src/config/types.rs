use serde::Deserialize;

/// Seeds crawled when the configuration names none
pub const DEFAULT_SEEDS: &[&str] = &["https://example.com/", "https://www.djangoproject.com/"];

/// Depth budget used when the configuration names none
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Visited-set database used when the configuration names none
pub const DEFAULT_DATABASE_PATH: &str = "db/db.sqlite";

/// Main configuration structure
///
/// Every section is optional; an empty file yields [`Config::default`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Addresses the crawl starts from, in order
    #[serde(default = "default_seeds")]
    pub seeds: Vec<String>,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Depth budget given to every seed
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Cap on GET requests in flight across the run; unbounded when absent
    #[serde(rename = "max-concurrent-fetches", default)]
    pub max_concurrent_fetches: Option<u32>,
}

/// Visited-set storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

/// HTTP client configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header; the client default is used when absent
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

fn default_seeds() -> Vec<String> {
    DEFAULT_SEEDS.iter().map(|s| s.to_string()).collect()
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seeds: default_seeds(),
            crawler: CrawlerConfig::default(),
            storage: StorageConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_concurrent_fetches: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}
