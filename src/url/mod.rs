//! URL handling module
//!
//! This module provides href resolution, origin derivation and the
//! http(s)-only address check used by the crawl engine and config validation.

mod normalize;
mod origin;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use normalize::normalize;
pub use origin::{base_of, same_origin, Origin};

/// Schemes the crawler is willing to fetch
const PROCESSABLE_SCHEMES: &[&str] = &["http", "https"];

/// Parses an absolute crawlable address
///
/// # Arguments
///
/// * `address` - The address to check
///
/// # Returns
///
/// * `Ok(Url)` - The address is absolute, http(s) and has a host
/// * `Err(UrlError)` - The address is empty, malformed or uses another scheme
pub fn parse_address(address: &str) -> UrlResult<Url> {
    let url = Url::parse(address).map_err(|e| UrlError::Parse(format!("{}: {}", address, e)))?;

    if !PROCESSABLE_SCHEMES.contains(&url.scheme()) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(address.to_string()));
    }

    Ok(url)
}

/// Returns true if the address may be handed to the fetcher
pub fn is_processable(address: &str) -> bool {
    parse_address(address).is_ok()
}
