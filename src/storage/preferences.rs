//! Key-value preference store
//!
//! Preferences live in a small JSON file next to the history database. The
//! display name is exposed as a `watch` channel so screens re-render when it
//! changes.

use crate::error::{ReaderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, watch};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
}

/// Persisted user preferences
pub struct PreferenceStore {
    path: PathBuf,
    user_name: watch::Sender<Option<String>>,
    /// Saves share one temp file, so they run one at a time
    save_lock: Mutex<()>,
}

impl PreferenceStore {
    /// Open the preference file, treating a missing file as empty
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let prefs = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<Preferences>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => return Err(ReaderError::Io(e)),
        };

        let (user_name, _) = watch::channel(prefs.user_name);
        Ok(Self {
            path,
            user_name,
            save_lock: Mutex::new(()),
        })
    }

    /// Observable display name
    pub fn display_name(&self) -> watch::Receiver<Option<String>> {
        self.user_name.subscribe()
    }

    /// Current display name
    pub fn current_display_name(&self) -> Option<String> {
        self.user_name.borrow().clone()
    }

    /// Persist the display name, then publish it
    pub async fn save_display_name(&self, name: &str) -> Result<()> {
        let prefs = Preferences {
            user_name: Some(name.to_string()),
        };
        let json = serde_json::to_string_pretty(&prefs)?;

        let _guard = self.save_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write-then-rename so a crash never leaves a truncated file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        self.user_name.send_replace(prefs.user_name);
        log::info!("Saved display name to {}", self.path.display());
        Ok(())
    }
}
