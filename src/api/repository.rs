//! HistoryRepository - async facade over the history store
//!
//! SQLite work runs on the blocking pool. After every mutation the full list
//! is re-read and published, so subscribers always see what is on disk.

use crate::error::{ReaderError, Result};
use crate::storage::{HistoryEntry, HistoryStore};
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Default retention window in days
pub const RETENTION_DAYS: i64 = 5;

/// Shared handle to the reading history
#[derive(Clone)]
pub struct HistoryRepository {
    store: Arc<Mutex<HistoryStore>>,
    entries: Arc<watch::Sender<Vec<HistoryEntry>>>,
}

impl HistoryRepository {
    pub fn new(store: HistoryStore) -> Result<Self> {
        let initial = store.list()?;
        let (entries, _) = watch::channel(initial);
        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            entries: Arc::new(entries),
        })
    }

    /// Observable list of all entries, most recently opened first
    pub fn history(&self) -> watch::Receiver<Vec<HistoryEntry>> {
        self.entries.subscribe()
    }

    pub async fn list(&self) -> Result<Vec<HistoryEntry>> {
        self.with_store(|store| store.list()).await
    }

    pub async fn get(&self, uri: &str) -> Result<Option<HistoryEntry>> {
        let uri = uri.to_string();
        self.with_store(move |store| store.get(&uri)).await
    }

    /// Insert or replace the entry for `entry.uri`
    pub async fn insert(&self, entry: HistoryEntry) -> Result<()> {
        self.mutate(move |store| store.upsert(&entry)).await
    }

    pub async fn delete(&self, uri: &str) -> Result<bool> {
        let uri = uri.to_string();
        self.mutate(move |store| store.delete(&uri)).await
    }

    /// Delete entries last opened more than `days` days before `now`
    pub async fn delete_older_than_days(&self, days: i64, now: DateTime<Utc>) -> Result<usize> {
        let cutoff = now - Duration::days(days);
        let removed = self.mutate(move |store| store.delete_older_than(cutoff)).await?;
        if removed > 0 {
            log::info!("Pruned {} history entries older than {}", removed, cutoff);
        }
        Ok(removed)
    }

    async fn mutate<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&HistoryStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (value, entries) = self
            .with_store(move |store| {
                let value = op(store)?;
                Ok((value, store.list()?))
            })
            .await?;
        self.entries.send_replace(entries);
        Ok(value)
    }

    async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&HistoryStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let guard = store
                .lock()
                .map_err(|_| ReaderError::Storage("history store lock poisoned".to_string()))?;
            op(&guard)
        })
        .await?
    }
}
