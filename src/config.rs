//! Configuration for beauty-reader
//!
//! Settings are grouped by concern. Every section has a `Default`, so an
//! empty or partial JSON file is a valid configuration.

use crate::error::{ReaderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory
pub const HOME_ENV: &str = "BEAUTY_READER_HOME";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where history and preferences are persisted
    pub storage: StorageConfig,

    /// Reading history policy
    pub history: HistoryConfig,
}

/// Storage locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the database and preference files
    pub data_dir: PathBuf,

    /// SQLite file name inside `data_dir`
    pub database_file: String,

    /// Preference file name inside `data_dir`
    pub preferences_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".beauty-reader"),
            database_file: "history.db".to_string(),
            preferences_file: "preferences.json".to_string(),
        }
    }
}

/// History retention
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Entries last opened more than this many days ago are pruned
    pub retention_days: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            retention_days: crate::api::repository::RETENTION_DAYS,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, then apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReaderError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut config: Config = serde_json::from_str(&content)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(home) = std::env::var(HOME_ENV) {
            if !home.trim().is_empty() {
                self.storage.data_dir = PathBuf::from(home);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.history.retention_days <= 0 {
            return Err(ReaderError::Config(format!(
                "retention_days must be positive, got {}",
                self.history.retention_days
            )));
        }
        if self.storage.database_file.trim().is_empty() {
            return Err(ReaderError::Config("database_file is empty".to_string()));
        }
        if self.storage.preferences_file.trim().is_empty() {
            return Err(ReaderError::Config("preferences_file is empty".to_string()));
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.database_file)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.preferences_file)
    }
}
