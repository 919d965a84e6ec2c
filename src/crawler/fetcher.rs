//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client shared by every branch of a run
//! - One GET per claimed address, no retries
//! - Classifying the result without ever propagating an error

use crate::config::HttpConfig;
use reqwest::Client;

/// Result of a fetch operation
///
/// The crawl engine treats every failure as an empty page, but the variants
/// keep "fetched an empty page" apart from "fetch failed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx response with its body
    Page {
        /// HTTP status code
        status_code: u16,
        /// Page body content (possibly empty)
        body: String,
    },

    /// Non-2xx response; the body is discarded
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Transport failure (DNS, connect, reset, malformed response, body read)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Returns true for a 2xx response
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Page { .. })
    }

    /// Returns the HTTP status code, if a response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Page { status_code, .. } | Self::HttpError { status_code } => {
                Some(*status_code)
            }
            Self::NetworkError { .. } => None,
        }
    }

    /// Returns the page text; empty for every failure
    pub fn body(&self) -> &str {
        match self {
            Self::Page { body, .. } => body,
            _ => "",
        }
    }
}

/// Builds the HTTP client shared by a crawl run
///
/// Transport defaults are kept (redirects, no timeout). Only the user agent
/// is configurable.
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use scoped_crawl::config::HttpConfig;
/// use scoped_crawl::crawler::build_http_client;
///
/// let config = HttpConfig {
///     user_agent: Some("scoped-crawl/0.1".to_string()),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().gzip(true).brotli(true);

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }

    builder.build()
}

/// Fetches a URL with a single GET
///
/// # Outcome Mapping
///
/// | Condition | Outcome | Log level |
/// |-----------|---------|-----------|
/// | HTTP 2xx | `Page` | info |
/// | Any other status | `HttpError` | error |
/// | Send or body-read failure | `NetworkError` | error |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchOutcome; this function never fails
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            tracing::error!("Request to {} failed: {}", url, error);
            return FetchOutcome::NetworkError { error };
        }
    };

    let status = response.status();
    let status_code = status.as_u16();

    if !status.is_success() {
        tracing::error!(status = status_code, "Unsuccessful response from {}", url);
        return FetchOutcome::HttpError { status_code };
    }

    tracing::info!(status = status_code, "Fetched {}", url);

    match response.text().await {
        Ok(body) => FetchOutcome::Page { status_code, body },
        Err(e) => {
            tracing::error!("Failed to read body of {}: {}", url, e);
            FetchOutcome::NetworkError {
                error: e.to_string(),
            }
        }
    }
}
