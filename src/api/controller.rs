//! ReaderController - owner of all reader state
//!
//! State is published through `watch` channels and only this type writes to
//! them. Operations that touch the disk run as background tasks and report
//! failures to the log; callers get a `JoinHandle` they may await but never
//! an outcome.

use crate::api::repository::HistoryRepository;
use crate::config::Config;
use crate::error::Result;
use crate::storage::{HistoryEntry, HistoryStore, PreferenceStore};
use crate::text::{BookContent, PdfProcessor, TextExtractor, open_document, title_for};
use crate::utils::ensure_directory;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Clamp a requested page into `[0, total_pages - 1]`, or `0` with no pages
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let last = total_pages.saturating_sub(1) as i64;
    requested.clamp(0, last) as usize
}

/// Mediates between the extractor, the stores and the presentation layer
#[derive(Clone)]
pub struct ReaderController {
    repository: HistoryRepository,
    preferences: Arc<PreferenceStore>,
    extractor: Arc<dyn TextExtractor>,
    retention_days: i64,
    book: Arc<watch::Sender<Option<Arc<BookContent>>>>,
    page: Arc<watch::Sender<usize>>,
    current: Arc<watch::Sender<Option<String>>>,
    reader_mode: Arc<watch::Sender<bool>>,
}

impl ReaderController {
    pub fn new(
        repository: HistoryRepository,
        preferences: PreferenceStore,
        extractor: Arc<dyn TextExtractor>,
        retention_days: i64,
    ) -> Self {
        Self {
            repository,
            preferences: Arc::new(preferences),
            extractor,
            retention_days,
            book: Arc::new(watch::channel(None).0),
            page: Arc::new(watch::channel(0).0),
            current: Arc::new(watch::channel(None).0),
            reader_mode: Arc::new(watch::channel(false).0),
        }
    }

    /// Open the stores described by `config` with the PDF extractor
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        ensure_directory(&config.storage.data_dir)?;

        let repository = HistoryRepository::new(HistoryStore::open(config.database_path())?)?;
        let preferences = PreferenceStore::open(config.preferences_path())?;
        let extractor: Arc<dyn TextExtractor> = Arc::new(PdfProcessor::new()?);

        log::info!("Reader data directory: {}", config.storage.data_dir.display());
        Ok(Self::new(
            repository,
            preferences,
            extractor,
            config.history.retention_days,
        ))
    }

    pub fn book(&self) -> watch::Receiver<Option<Arc<BookContent>>> {
        self.book.subscribe()
    }

    pub fn current_page(&self) -> watch::Receiver<usize> {
        self.page.subscribe()
    }

    pub fn current_document(&self) -> watch::Receiver<Option<String>> {
        self.current.subscribe()
    }

    pub fn reader_mode(&self) -> watch::Receiver<bool> {
        self.reader_mode.subscribe()
    }

    pub fn display_name(&self) -> watch::Receiver<Option<String>> {
        self.preferences.display_name()
    }

    pub fn history(&self) -> watch::Receiver<Vec<HistoryEntry>> {
        self.repository.history()
    }

    pub fn repository(&self) -> &HistoryRepository {
        &self.repository
    }

    /// Load a document in the background.
    ///
    /// The history entry is written first. Only then is the content replaced
    /// and the page index reset to 0. On failure nothing but the log changes.
    pub fn load(&self, document_ref: impl Into<String>) -> JoinHandle<()> {
        let document_ref = document_ref.into();
        let was_reading = self.reader_mode.send_replace(true);
        let this = self.clone();

        tokio::spawn(async move {
            if let Err(e) = this.load_document(&document_ref).await {
                log::error!("Failed to load {}: {}", document_ref, e);
                this.reader_mode.send_replace(was_reading);
            }
        })
    }

    async fn load_document(&self, document_ref: &str) -> Result<()> {
        let extractor = Arc::clone(&self.extractor);
        let reference = document_ref.to_string();
        let extracted = tokio::task::spawn_blocking(move || {
            let reader = open_document(&reference)?;
            extractor.extract(Box::new(reader))
        })
        .await??;

        let title = title_for(document_ref);
        let book = BookContent::new(title.clone(), extracted);

        // Nothing is published until the history entry is stored
        let now = Utc::now();
        self.repository
            .insert(HistoryEntry {
                uri: document_ref.to_string(),
                title,
                last_opened: now,
                saved_at: now,
                owner_name: self.preferences.current_display_name(),
            })
            .await?;

        log::info!("Loaded {} ({} pages)", document_ref, book.total_pages);
        self.book.send_replace(Some(Arc::new(book)));
        self.page.send_replace(0);
        self.current.send_replace(Some(document_ref.to_string()));
        Ok(())
    }

    /// Clamp and publish the page index. Returns the published index.
    pub fn navigate_to_page(&self, requested: i64) -> usize {
        let total_pages = self.book.borrow().as_ref().map_or(0, |book| book.total_pages);
        let index = clamp_page(requested, total_pages);
        log::debug!("Navigate to page {} (requested {})", index, requested);
        self.page.send_replace(index);
        index
    }

    /// Remove a history entry. Current content is left alone.
    pub fn delete(&self, entry: &HistoryEntry) -> JoinHandle<()> {
        let uri = entry.uri.clone();
        let repository = self.repository.clone();

        tokio::spawn(async move {
            match repository.delete(&uri).await {
                Ok(true) => log::info!("Deleted history entry {}", uri),
                Ok(false) => log::debug!("No history entry for {}", uri),
                Err(e) => log::error!("Failed to delete {}: {}", uri, e),
            }
        })
    }

    /// Delete the open document's history entry and close it
    pub fn delete_current(&self) -> Option<JoinHandle<()>> {
        let uri = self.current.borrow().clone()?;
        let title = self
            .book
            .borrow()
            .as_ref()
            .map(|book| book.title.clone())
            .unwrap_or_else(|| title_for(&uri));
        let now = Utc::now();
        let entry = HistoryEntry {
            uri,
            title,
            last_opened: now,
            saved_at: now,
            owner_name: self.preferences.current_display_name(),
        };

        self.clear_current_book();
        Some(self.delete(&entry))
    }

    /// Drop the open document without touching history
    pub fn clear_current_book(&self) {
        self.book.send_replace(None);
        self.page.send_replace(0);
        self.current.send_replace(None);
    }

    /// Leave the reader view
    pub fn navigate_back(&self) {
        self.reader_mode.send_replace(false);
        self.clear_current_book();
    }

    /// Delete entries older than the retention window. Safe to call often.
    pub fn prune_history(&self) -> JoinHandle<()> {
        let repository = self.repository.clone();
        let days = self.retention_days;

        tokio::spawn(async move {
            if let Err(e) = repository.delete_older_than_days(days, Utc::now()).await {
                log::error!("Failed to prune history: {}", e);
            }
        })
    }

    /// Persist a display name. Blank names are ignored.
    pub fn set_display_name(&self, name: &str) -> Option<JoinHandle<()>> {
        let name = name.trim().to_string();
        if name.is_empty() {
            log::debug!("Ignoring blank display name");
            return None;
        }

        let preferences = Arc::clone(&self.preferences);
        Some(tokio::spawn(async move {
            if let Err(e) = preferences.save_display_name(&name).await {
                log::error!("Failed to save display name: {}", e);
            }
        }))
    }
}
