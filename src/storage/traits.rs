//! Storage traits and error types
//!
//! This module defines the visited-set interface the crawl engine depends on
//! and the errors a backend may report.

use thiserror::Error;

/// Errors that can occur during storage operations
///
/// Every storage error is fatal to a crawl run: without a working visited set
/// deduplication cannot be guaranteed.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Visited-set lock poisoned")]
    LockPoisoned,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A durable set of addresses that have been selected for fetching
///
/// Implementations are shared by every crawl branch of a run, so all methods
/// take `&self` and must be safe to call from many tasks at once.
pub trait VisitedStore: Send + Sync {
    /// Creates the backing table if it does not exist
    ///
    /// Idempotent; called once before any crawl begins.
    fn table_ready(&self) -> StorageResult<()>;

    /// Atomically records `address` if it is not yet present
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The claim succeeded; the caller owns the fetch
    /// * `Ok(false)` - The address was already recorded; the caller must skip
    ///
    /// Two callers racing on the same address never both receive `true`.
    fn try_claim(&self, address: &str) -> StorageResult<bool>;

    /// Returns true if `address` has been claimed
    fn contains(&self, address: &str) -> StorageResult<bool>;

    /// Counts recorded addresses
    fn count(&self) -> StorageResult<u64>;

    /// Forgets every recorded address
    ///
    /// The crawl engine never calls this; it exists for the `--fresh` entry
    /// point.
    fn clear(&self) -> StorageResult<()>;
}
