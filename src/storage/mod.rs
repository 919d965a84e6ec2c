//! Storage module for the durable visited set
//!
//! This module handles all database operations for the crawler:
//! - SQLite database initialization and schema management
//! - Atomic claim-before-fetch deduplication
//! - Visited-set inspection for statistics

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{StorageError, StorageResult, VisitedStore};

use std::path::Path;

/// Opens the visited-set database at `path` and makes sure its table exists
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Store ready for claims
/// * `Err(StorageError)` - Failed to open or initialize the database
pub fn open_store(path: &Path) -> StorageResult<SqliteStore> {
    let store = SqliteStore::open(path)?;
    store.table_ready()?;
    Ok(store)
}
