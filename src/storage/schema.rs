//! Database schema definitions

/// SQL for the migration tracking table
pub const CREATE_MIGRATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version TEXT NOT NULL UNIQUE,
    applied_at INTEGER NOT NULL
);
"#;

/// SQL for creating the history table at revision 1 (timestamps are Unix milliseconds)
pub const CREATE_PDFS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS pdfs (
    uri TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    last_opened INTEGER NOT NULL,
    saved_at INTEGER NOT NULL
);
"#;

/// SQL for the retention scan index
pub const CREATE_PDFS_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_pdfs_last_opened ON pdfs(last_opened);
"#;

/// Revision 2 adds the owner name column
pub const ADD_OWNER_NAME_COLUMN: &str = "ALTER TABLE pdfs ADD COLUMN owner_name TEXT";

pub const HISTORY_COLUMNS: &str = "uri, title, last_opened, saved_at, owner_name";
