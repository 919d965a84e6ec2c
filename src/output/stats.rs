//! Statistics from the visited-set database
//!
//! This module provides the `--stats` view: what the durable store knows
//! across every run that used it.

use crate::storage::{SqliteStore, VisitedStore};
use crate::Result;
use std::path::Path;

/// Visited-set statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStatistics {
    /// Addresses claimed by any run against this store
    pub visited_addresses: u64,
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `store` - The visited store to query
///
/// # Returns
///
/// * `Ok(StoreStatistics)` - Successfully loaded statistics
/// * `Err(CrawlError)` - Failed to query the store
pub fn load_statistics(store: &dyn VisitedStore) -> Result<StoreStatistics> {
    let visited_addresses = store.count()?;
    Ok(StoreStatistics { visited_addresses })
}

/// Loads statistics from the database file at `path` without modifying it
///
/// A missing database file, or one whose table was never created, has
/// visited nothing.
pub fn load_statistics_at(path: &Path) -> Result<StoreStatistics> {
    let store = match SqliteStore::open_existing(path)? {
        Some(store) => store,
        None => {
            tracing::debug!("No visited-set database at {}", path.display());
            return Ok(StoreStatistics {
                visited_addresses: 0,
            });
        }
    };

    if !store.has_table()? {
        return Ok(StoreStatistics {
            visited_addresses: 0,
        });
    }

    load_statistics(&store)
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Visited Set ===\n");
    println!("  Addresses claimed: {}", stats.visited_addresses);
    if stats.visited_addresses > 0 {
        println!("  (these will not be fetched again unless the store is cleared with --fresh)");
    }
}
