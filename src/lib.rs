//! # beauty-reader
//!
//! A PDF reader: pick a document, read its text page by page, and come back
//! to it later from the reading history.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use beauty_reader::{Config, ReaderController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let controller = ReaderController::open(&Config::from_env())?;
//!
//!     // Loading runs in the background; await the handle to wait for it
//!     controller.load("/books/novel.pdf").await?;
//!
//!     if let Some(book) = controller.book().borrow().as_ref() {
//!         println!("{} has {} pages", book.title, book.total_pages);
//!     }
//!     controller.navigate_to_page(1);
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod storage;
pub mod text;
pub mod ui;
pub mod utils;

// Re-export main API types
pub use api::{HistoryRepository, ReaderController, clamp_page};
pub use config::Config;
pub use error::{ReaderError, Result};

// Re-export commonly used types
pub use storage::{HistoryEntry, HistoryStore, PreferenceStore};
pub use text::{BookContent, PdfProcessor, TextExtractor};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_imports() {
        // Ensure all major types can be imported
        let _config = Config::default();
    }
}
