//! Crawl engine - recursive per-address expansion
//!
//! Each address is handled by one task that walks the [`NodeState`] machine:
//!
//! 1. Reject empty or non-http(s) addresses
//! 2. Claim the address in the visited store (lost claim → already visited)
//! 3. Stop if the depth budget is 0 (the claim stands)
//! 4. Fetch the page
//! 5. Extract anchors, resolve them against the page, keep same-origin ones
//! 6. Spawn one child task per kept address with `depth - 1` and join them
//!
//! The tasks form a tree: a node finishes only after all of its children
//! have finished, and a fatal storage error anywhere unwinds the whole tree.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::crawler::parser::extract_links;
use crate::crawler::stats::{CrawlStats, StatsSnapshot};
use crate::state::NodeState;
use crate::storage::VisitedStore;
use crate::url::{base_of, is_processable, normalize};
use crate::{CrawlError, Result};
use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::Instrument;

static NO_CHILDREN: BTreeSet<String> = BTreeSet::new();

/// What one crawl node produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOutcome {
    /// The address was empty or not http(s)
    Rejected,

    /// The claim was lost; nothing was fetched
    AlreadyVisited,

    /// The address was claimed but the budget was 0; nothing was fetched
    DepthExhausted,

    /// The page was fetched (or the fetch failed softly) and every child
    /// branch has finished
    Completed {
        /// HTTP status, `None` on transport failure
        status_code: Option<u16>,
        /// Whether the fetch returned a 2xx page
        fetch_succeeded: bool,
        /// Same-origin addresses found on this page, one level only
        children: BTreeSet<String>,
    },
}

impl NodeOutcome {
    /// The terminal state this node ended in
    pub fn state(&self) -> NodeState {
        match self {
            Self::Rejected => NodeState::Rejected,
            Self::AlreadyVisited => NodeState::AlreadyVisited,
            Self::DepthExhausted => NodeState::DepthExhausted,
            Self::Completed { .. } => NodeState::Completed,
        }
    }

    /// The accepted child addresses; empty unless the node completed
    pub fn children(&self) -> &BTreeSet<String> {
        match self {
            Self::Completed { children, .. } => children,
            _ => &NO_CHILDREN,
        }
    }

    /// Consumes the outcome, returning the accepted child addresses
    pub fn into_children(self) -> BTreeSet<String> {
        match self {
            Self::Completed { children, .. } => children,
            _ => BTreeSet::new(),
        }
    }
}

/// Shared crawl context: one HTTP client, one visited store, one set of
/// counters and an optional cap on in-flight fetches
///
/// Cloning is cheap; every clone shares the same resources.
#[derive(Clone)]
pub struct Crawler {
    client: Client,
    store: Arc<dyn VisitedStore>,
    fetch_limit: Option<Arc<Semaphore>>,
    stats: Arc<CrawlStats>,
}

impl Crawler {
    /// Creates a crawler with unbounded fan-out
    pub fn new(client: Client, store: Arc<dyn VisitedStore>) -> Self {
        Self {
            client,
            store,
            fetch_limit: None,
            stats: Arc::new(CrawlStats::new()),
        }
    }

    /// Builds a crawler from the HTTP and concurrency settings of `config`
    ///
    /// # Arguments
    ///
    /// * `config` - The crawl configuration
    /// * `store` - The visited store, already `table_ready`
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(CrawlError)` - The HTTP client could not be built
    pub fn from_config(config: &Config, store: Arc<dyn VisitedStore>) -> Result<Self> {
        let client = build_http_client(&config.http)?;
        let crawler = Self::new(client, store);

        Ok(match config.crawler.max_concurrent_fetches {
            Some(max) => crawler.with_fetch_limit(max as usize),
            None => crawler,
        })
    }

    /// Caps the number of GET requests in flight across the whole run
    ///
    /// Only the fetch holds a permit, never the wait on children, so a deep
    /// tree cannot starve itself.
    pub fn with_fetch_limit(mut self, max_in_flight: usize) -> Self {
        self.fetch_limit = Some(Arc::new(Semaphore::new(max_in_flight.max(1))));
        self
    }

    /// Returns the visited store shared by this crawler
    pub fn store(&self) -> &Arc<dyn VisitedStore> {
        &self.store
    }

    /// Returns a snapshot of the run counters
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Crawls `address` with the given depth budget
    ///
    /// The returned future is `'static` and `Send`, so it can be spawned.
    ///
    /// # Returns
    ///
    /// * `Ok(NodeOutcome)` - The branch finished; fetch failures are not errors
    /// * `Err(CrawlError)` - The visited store failed or a child task panicked
    pub fn crawl(
        &self,
        address: impl Into<String>,
        depth: u32,
    ) -> BoxFuture<'static, Result<NodeOutcome>> {
        let crawler = self.clone();
        let address = address.into();
        let span = tracing::info_span!("crawl", url = %address, depth);

        async move { crawler.visit(address, depth).await }
            .instrument(span)
            .boxed()
    }

    async fn visit(self, address: String, depth: u32) -> Result<NodeOutcome> {
        if !is_processable(&address) {
            tracing::info!("Invalid URL: {:?}", address);
            self.stats.record_rejected();
            return Ok(NodeOutcome::Rejected);
        }

        if !self.store.try_claim(&address)? {
            tracing::info!("URL {} is already in the database", address);
            self.stats.record_already_visited();
            return Ok(NodeOutcome::AlreadyVisited);
        }
        self.stats.record_claimed();

        if depth == 0 {
            tracing::info!("Reached the maximum depth for URL {}", address);
            self.stats.record_depth_exhausted();
            return Ok(NodeOutcome::DepthExhausted);
        }

        let mut state = NodeState::Fetching;
        let fetched = self.fetch(&address).await;

        advance(&mut state, NodeState::Expanding);
        let children = self.expand(&address, fetched.body());

        advance(&mut state, NodeState::Recursing);
        self.recurse(&address, &children, depth - 1).await?;

        advance(&mut state, NodeState::Completed);
        Ok(NodeOutcome::Completed {
            status_code: fetched.status_code(),
            fetch_succeeded: fetched.is_success(),
            children,
        })
    }

    async fn fetch(&self, address: &str) -> FetchOutcome {
        let _permit = match &self.fetch_limit {
            Some(limit) => limit.acquire().await.ok(),
            None => None,
        };

        let outcome = fetch_url(&self.client, address).await;
        self.stats.record_fetch(outcome.is_success());
        outcome
    }

    /// Resolves every anchor on the page and keeps the same-origin ones
    fn expand(&self, address: &str, body: &str) -> BTreeSet<String> {
        let links = extract_links(body);

        let children: BTreeSet<String> = match base_of(address) {
            Some(origin) => links
                .iter()
                .filter_map(|href| normalize(href.as_deref(), address))
                .filter(|child| origin.admits(child))
                .collect(),
            None => BTreeSet::new(),
        };

        tracing::debug!(
            discovered = links.len(),
            accepted = children.len(),
            "Expanded {}",
            address
        );
        self.stats.record_expansion(links.len(), children.len());

        children
    }

    /// Runs one child task per address and waits for all of them
    async fn recurse(&self, address: &str, children: &BTreeSet<String>, depth: u32) -> Result<()> {
        let mut tasks = JoinSet::new();
        for child in children {
            tasks.spawn(self.crawl(child.clone(), depth));
        }

        // Dropping the set on an early return aborts the remaining siblings
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => return Err(e),
                Err(source) => {
                    return Err(CrawlError::TaskJoin {
                        url: address.to_string(),
                        source,
                    })
                }
            }
        }

        Ok(())
    }
}

fn advance(state: &mut NodeState, next: NodeState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal transition {} -> {}",
        state,
        next
    );
    tracing::trace!("{} -> {}", state, next);
    *state = next;
}
