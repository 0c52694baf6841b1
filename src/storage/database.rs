//! SQLite history store for beauty-reader
//!
//! One row per opened document, keyed by its reference. Writes are
//! insert-or-replace so reopening a document refreshes its row instead of
//! adding a second one.

use crate::error::{ReaderError, Result};
use crate::storage::HistoryEntry;
use crate::storage::migrations::MigrationManager;
use crate::storage::schema::*;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

/// History database connection and operations
pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    /// Open (or create) the history database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| ReaderError::Storage(format!("Failed to open database: {}", e)))?;

        let store = Self { conn };
        store.initialize(true)?;
        Ok(store)
    }

    /// Create an in-memory database (for testing)
    pub fn memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ReaderError::Storage(format!("Failed to create in-memory database: {}", e)))?;

        let store = Self { conn };
        store.initialize(false)?;
        Ok(store)
    }

    fn initialize(&self, wal: bool) -> Result<()> {
        if wal {
            let _: String = self
                .conn
                .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
                .map_err(|e| ReaderError::Storage(format!("Failed to enable WAL mode: {}", e)))?;
        }

        let applied = MigrationManager::new(&self.conn).run_migrations()?;
        log::info!("History database ready ({} migrations applied)", applied);
        Ok(())
    }

    /// Insert an entry, replacing any existing row with the same reference
    pub fn upsert(&self, entry: &HistoryEntry) -> Result<()> {
        self.conn
            .execute(
                &format!(
                    "INSERT OR REPLACE INTO pdfs ({}) VALUES (?, ?, ?, ?, ?)",
                    HISTORY_COLUMNS
                ),
                params![
                    entry.uri,
                    entry.title,
                    entry.last_opened.timestamp_millis(),
                    entry.saved_at.timestamp_millis(),
                    entry.owner_name,
                ],
            )
            .map_err(|e| ReaderError::Storage(format!("Failed to save {}: {}", entry.uri, e)))?;
        Ok(())
    }

    /// Delete by reference. Returns whether a row was removed.
    pub fn delete(&self, uri: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM pdfs WHERE uri = ?", params![uri])
            .map_err(|e| ReaderError::Storage(format!("Failed to delete {}: {}", uri, e)))?;
        Ok(removed > 0)
    }

    /// Delete every entry last opened strictly before `cutoff`
    pub fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM pdfs WHERE last_opened < ?",
                params![cutoff.timestamp_millis()],
            )
            .map_err(|e| ReaderError::Storage(format!("Failed to prune history: {}", e)))?;
        Ok(removed)
    }

    pub fn get(&self, uri: &str) -> Result<Option<HistoryEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("SELECT {} FROM pdfs WHERE uri = ?", HISTORY_COLUMNS),
                params![uri],
                row_to_entry,
            )
            .optional()
            .map_err(|e| ReaderError::Storage(format!("Failed to query {}: {}", uri, e)))?;
        Ok(entry)
    }

    /// All entries, most recently opened first
    pub fn list(&self) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM pdfs ORDER BY last_opened DESC, uri",
                HISTORY_COLUMNS
            ))
            .map_err(|e| ReaderError::Storage(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], row_to_entry)
            .map_err(|e| ReaderError::Storage(format!("Failed to list history: {}", e)))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| {
                ReaderError::Storage(format!("Failed to process history row: {}", e))
            })?);
        }
        Ok(result)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pdfs", [], |row| row.get(0))
            .map_err(|e| ReaderError::Storage(format!("Failed to count history: {}", e)))?;
        Ok(count as usize)
    }
}

fn row_to_entry(row: &Row) -> rusqlite::Result<HistoryEntry> {
    Ok(HistoryEntry {
        uri: row.get(0)?,
        title: row.get(1)?,
        last_opened: from_millis(row.get(2)?),
        saved_at: from_millis(row.get(3)?),
        owner_name: row.get(4)?,
    })
}

fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}
