use crate::config::types::{Config, CrawlerConfig, HttpConfig, StorageConfig};
use crate::url::parse_address;
use crate::ConfigError;

/// Upper bound for `max-concurrent-fetches`
const MAX_CONCURRENT_FETCHES: u32 = 10_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_seeds(&config.seeds)?;
    validate_crawler_config(&config.crawler)?;
    validate_storage_config(&config.storage)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates the seed list: non-empty, every entry an absolute http(s) URL
fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in seeds {
        parse_address(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if let Some(max) = config.max_concurrent_fetches {
        if max < 1 || max > MAX_CONCURRENT_FETCHES {
            return Err(ConfigError::Validation(format!(
                "max_concurrent_fetches must be between 1 and {}, got {}",
                MAX_CONCURRENT_FETCHES, max
            )));
        }
    }

    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if let Some(user_agent) = &config.user_agent {
        if user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agent cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}
