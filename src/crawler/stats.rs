//! Run-wide crawl counters
//!
//! Every branch of a run shares one `CrawlStats`; counters are plain atomics
//! so recording never contends with the visited-set lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters updated by crawl branches
#[derive(Debug, Default)]
pub struct CrawlStats {
    rejected: AtomicU64,
    already_visited: AtomicU64,
    depth_exhausted: AtomicU64,
    claimed: AtomicU64,
    fetched: AtomicU64,
    fetch_failures: AtomicU64,
    links_discovered: AtomicU64,
    children_accepted: AtomicU64,
}

/// Point-in-time copy of [`CrawlStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Addresses dropped before the claim (empty or non-http(s))
    pub rejected: u64,
    /// Claims lost to another branch or an earlier run
    pub already_visited: u64,
    /// Claimed addresses that were not fetched because the budget was 0
    pub depth_exhausted: u64,
    /// Successful claims
    pub claimed: u64,
    /// GET requests that returned a 2xx page
    pub fetched: u64,
    /// GET requests that failed (non-2xx or transport)
    pub fetch_failures: u64,
    /// Raw anchors found, before resolution and filtering
    pub links_discovered: u64,
    /// Same-origin children handed to the next level
    pub children_accepted: u64,
}

impl StatsSnapshot {
    /// Total GET requests issued
    pub fn requests(&self) -> u64 {
        self.fetched + self.fetch_failures
    }
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_already_visited(&self) {
        self.already_visited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_depth_exhausted(&self) {
        self.depth_exhausted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_claimed(&self) {
        self.claimed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records the result of one GET
    pub fn record_fetch(&self, success: bool) {
        if success {
            self.fetched.fetch_add(1, Ordering::Relaxed);
        } else {
            self.fetch_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records one expansion: raw anchors found and children kept
    pub fn record_expansion(&self, discovered: usize, accepted: usize) {
        self.links_discovered
            .fetch_add(discovered as u64, Ordering::Relaxed);
        self.children_accepted
            .fetch_add(accepted as u64, Ordering::Relaxed);
    }

    /// Takes a snapshot of all counters
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            rejected: self.rejected.load(Ordering::Relaxed),
            already_visited: self.already_visited.load(Ordering::Relaxed),
            depth_exhausted: self.depth_exhausted.load(Ordering::Relaxed),
            claimed: self.claimed.load(Ordering::Relaxed),
            fetched: self.fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
            children_accepted: self.children_accepted.load(Ordering::Relaxed),
        }
    }
}
