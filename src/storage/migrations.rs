//! Database migrations and compatibility

use crate::error::{ReaderError, Result};
use crate::storage::schema::*;
use rusqlite::{Connection, OptionalExtension, params};

/// Available migrations in order
const MIGRATIONS: &[(&str, &str)] = &[
    ("initial_schema", "Create history table"),
    ("add_owner_name", "Add owner name column to history"),
];

/// Database migration manager
pub struct MigrationManager<'a> {
    conn: &'a Connection,
}

impl<'a> MigrationManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Run all pending migrations
    pub fn run_migrations(&self) -> Result<usize> {
        self.conn
            .execute_batch(CREATE_MIGRATIONS_TABLE)
            .map_err(|e| ReaderError::Storage(format!("Failed to create migrations table: {}", e)))?;

        let applied = self.applied_versions()?;
        let mut count = 0;

        for (version, description) in MIGRATIONS {
            if applied.iter().any(|v| v == version) {
                continue;
            }

            log::info!("Applying migration: {} - {}", version, description);
            let tx = self.conn.unchecked_transaction().map_err(|e| {
                ReaderError::Storage(format!("Failed to start migration {}: {}", version, e))
            })?;

            self.apply_migration(&tx, version)?;

            tx.execute(
                "INSERT INTO migrations (version, applied_at) VALUES (?, ?)",
                params![version, chrono::Utc::now().timestamp_millis()],
            )
            .map_err(|e| ReaderError::Storage(format!("Failed to record migration {}: {}", version, e)))?;

            tx.commit().map_err(|e| {
                ReaderError::Storage(format!("Failed to commit migration {}: {}", version, e))
            })?;
            count += 1;
        }

        Ok(count)
    }

    /// Apply a specific migration
    fn apply_migration(&self, conn: &Connection, version: &str) -> Result<()> {
        match version {
            "initial_schema" => {
                conn.execute_batch(CREATE_PDFS_TABLE)?;
                conn.execute_batch(CREATE_PDFS_INDEXES)?;
                Ok(())
            }
            "add_owner_name" => {
                if !column_exists(conn, "pdfs", "owner_name")? {
                    conn.execute(ADD_OWNER_NAME_COLUMN, [])?;
                }
                Ok(())
            }
            _ => Err(ReaderError::Storage(format!("Unknown migration version: {}", version))),
        }
    }

    fn applied_versions(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT version FROM migrations ORDER BY id")
            .map_err(|e| ReaderError::Storage(format!("Failed to prepare migration query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| ReaderError::Storage(format!("Failed to execute migration query: {}", e)))?;

        let mut versions = Vec::new();
        for version in rows {
            versions.push(version.map_err(|e| {
                ReaderError::Storage(format!("Failed to read migration version: {}", e))
            })?);
        }
        Ok(versions)
    }

    /// Get the most recently applied migration
    pub fn get_current_version(&self) -> Result<Option<String>> {
        let version = self
            .conn
            .query_row(
                "SELECT version FROM migrations ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| ReaderError::Storage(format!("Failed to query current version: {}", e)))?;
        Ok(version)
    }

    /// Check if database is up to date
    pub fn is_up_to_date(&self) -> Result<bool> {
        let latest = MIGRATIONS.last().map(|(version, _)| *version);
        Ok(self.get_current_version()?.as_deref() == latest)
    }
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
        params![table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
