//! PDF text extraction
//!
//! Pages are extracted one at a time with `lopdf` so page boundaries are
//! preserved. When `lopdf` cannot handle a document the whole file is handed
//! to `pdf-extract`, whose output is split on form feeds.

use crate::error::{ReaderError, Result};
use regex::Regex;
use std::io::Read;

/// Plain text of every page, in page order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedPages {
    pub pages: Vec<String>,
}

impl ExtractedPages {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Turns an opened byte stream into per-page text.
///
/// Implementations take ownership of the reader so it is closed when
/// extraction returns, whether it succeeded or not.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, reader: Box<dyn Read + Send>) -> Result<ExtractedPages>;
}

/// `lopdf`-backed extractor with a `pdf-extract` fallback
pub struct PdfProcessor {
    crlf_regex: Regex,
    blank_lines_regex: Regex,
}

impl PdfProcessor {
    pub fn new() -> Result<Self> {
        let crlf_regex = Regex::new(r"\r\n?")
            .map_err(|e| ReaderError::Pdf(format!("Failed to compile line ending regex: {}", e)))?;
        let blank_lines_regex = Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+")
            .map_err(|e| ReaderError::Pdf(format!("Failed to compile blank line regex: {}", e)))?;

        Ok(Self {
            crlf_regex,
            blank_lines_regex,
        })
    }

    /// Extract from an in-memory document
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<ExtractedPages> {
        let pages = match Self::extract_with_lopdf(bytes) {
            Ok(pages) => pages,
            Err(primary) => {
                log::warn!("lopdf extraction failed ({}), falling back to pdf-extract", primary);
                Self::extract_with_pdf_extract(bytes).map_err(|fallback| {
                    ReaderError::Pdf(format!("{}; fallback: {}", primary, fallback))
                })?
            }
        };

        Ok(ExtractedPages {
            pages: pages.iter().map(|page| self.normalize(page)).collect(),
        })
    }

    fn extract_with_lopdf(bytes: &[u8]) -> Result<Vec<String>> {
        let doc = lopdf::Document::load_mem(bytes)?;
        if doc.is_encrypted() {
            return Err(ReaderError::Pdf("document is encrypted".to_string()));
        }

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(ReaderError::Pdf("document has no pages".to_string()));
        }

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            let text = doc.extract_text(&[page_number]).map_err(|e| {
                ReaderError::Pdf(format!("Failed to extract page {}: {}", page_number, e))
            })?;
            pages.push(text);
        }
        Ok(pages)
    }

    fn extract_with_pdf_extract(bytes: &[u8]) -> Result<Vec<String>> {
        // pdf-extract panics on some malformed fonts
        let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|_| ReaderError::Pdf("pdf-extract panicked".to_string()))?
            .map_err(|e| ReaderError::Pdf(format!("pdf-extract failed: {}", e)))?;

        // pdf-extract separates pages with form feeds
        let mut pages: Vec<String> = text.split('\x0C').map(str::to_string).collect();
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Ok(pages)
    }

    /// Normalize line endings, collapse runs of blank lines and trim the ends
    pub fn normalize(&self, text: &str) -> String {
        let text = self.crlf_regex.replace_all(text, "\n");
        let text = self.blank_lines_regex.replace_all(&text, "\n\n");
        text.trim().to_string()
    }
}

impl TextExtractor for PdfProcessor {
    fn extract(&self, mut reader: Box<dyn Read + Send>) -> Result<ExtractedPages> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        drop(reader);

        self.extract_bytes(&bytes)
    }
}
