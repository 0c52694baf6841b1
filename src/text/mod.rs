//! Text extraction for beauty-reader
//!
//! This module turns a document reference into the paginated content shown
//! by the reader.

pub mod pdf;
pub mod source;

// Re-export main types and functions
pub use pdf::{ExtractedPages, PdfProcessor, TextExtractor};
pub use source::{UNKNOWN_TITLE, open_document, title_for};

/// Extracted content of the open document
#[derive(Debug, Clone, PartialEq)]
pub struct BookContent {
    pub title: String,
    pub pages: Vec<String>,
    pub total_pages: usize,
}

impl BookContent {
    pub fn new(title: impl Into<String>, extracted: ExtractedPages) -> Self {
        let total_pages = extracted.page_count();
        Self {
            title: title.into(),
            pages: extracted.pages,
            total_pages,
        }
    }

    /// Text of a 0-based page
    pub fn page(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }
}
