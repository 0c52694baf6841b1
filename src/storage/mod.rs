//! Storage functionality for beauty-reader
//!
//! This module provides the reading history (embedded SQLite) and the
//! preference file.

pub mod database;
pub mod migrations;
pub mod preferences;
pub mod schema;

// Re-export main types
pub use database::HistoryStore;
pub use preferences::PreferenceStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A previously opened document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Document reference, unique per row
    pub uri: String,

    /// Display title (last path segment of the reference)
    pub title: String,

    /// When the document was last opened
    pub last_opened: DateTime<Utc>,

    /// When the row was written
    pub saved_at: DateTime<Utc>,

    /// Display name of the reader at the time, if one was set
    pub owner_name: Option<String>,
}
