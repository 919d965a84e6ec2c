//! SQLite storage implementation
//!
//! This module provides a SQLite-backed implementation of [`VisitedStore`].

use crate::storage::schema::{initialize_schema, table_exists};
use crate::storage::traits::{StorageError, StorageResult, VisitedStore};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite visited-set backend
///
/// The connection sits behind a mutex, so a claim is a single
/// check-and-insert that no other branch can interleave with. The `urls`
/// primary key backs that up at the database level.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database file at `path`
    ///
    /// Missing parent directories are created. The `urls` table is not
    /// created here; call [`VisitedStore::table_ready`] before crawling.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        tracing::debug!("Opened visited-set database at {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens the database at `path` only if the file already exists
    ///
    /// Returns `Ok(None)` without touching the filesystem when there is no
    /// database yet.
    pub fn open_existing(path: &Path) -> StorageResult<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        Self::open(path).map(Some)
    }

    /// Returns true once [`VisitedStore::table_ready`] has run against this
    /// database
    pub fn has_table(&self) -> StorageResult<bool> {
        let conn = self.lock()?;
        Ok(table_exists(&conn)?)
    }

    /// Creates an in-memory store that vanishes when dropped
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl VisitedStore for SqliteStore {
    fn table_ready(&self) -> StorageResult<()> {
        let conn = self.lock()?;
        initialize_schema(&conn)?;
        Ok(())
    }

    fn try_claim(&self, address: &str) -> StorageResult<bool> {
        let conn = self.lock()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO urls (url) VALUES (?1)",
            params![address],
        )?;
        Ok(inserted == 1)
    }

    fn contains(&self, address: &str) -> StorageResult<bool> {
        let conn = self.lock()?;
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM urls WHERE url = ?1",
                params![address],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn count(&self) -> StorageResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM urls", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn clear(&self) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM urls", [])?;
        Ok(())
    }
}
