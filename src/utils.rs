//! Utility functions for beauty-reader
//!
//! This module provides common utility functions used throughout the project.

use crate::error::{ReaderError, Result};
use chrono::{DateTime, Local, Utc};
use std::path::Path;

/// Get file extension from path
pub fn get_file_extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check if a file is a document the reader can open
pub fn is_supported_document<P: AsRef<Path>>(path: P) -> bool {
    matches!(get_file_extension(path).as_deref(), Some("pdf"))
}

/// Validate and normalize file path
pub fn normalize_path<P: AsRef<Path>>(path: P) -> Result<std::path::PathBuf> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReaderError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    path.canonicalize().map_err(ReaderError::Io)
}

/// Create directory if it doesn't exist
pub fn ensure_directory<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if !path.exists() {
        std::fs::create_dir_all(path).map_err(ReaderError::Io)?;
    }

    Ok(())
}

/// Calendar date in local time, e.g. "Oct 18, 2026"
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%b %d, %Y").to_string()
}

/// Truncate to `max_chars` characters, marking the cut with an ellipsis
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_extension() {
        assert_eq!(get_file_extension("test.pdf"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("test.PDF"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("test"), None);
        assert_eq!(get_file_extension("test.tar.gz"), Some("gz".to_string()));
    }

    #[test]
    fn test_supported_document() {
        assert!(is_supported_document("document.pdf"));
        assert!(is_supported_document("SCAN.PDF"));
        assert!(!is_supported_document("notes.txt"));
        assert!(!is_supported_document("pdf"));
    }

    #[test]
    fn test_normalize_path() {
        let temp_file = NamedTempFile::new().unwrap();
        let normalized = normalize_path(temp_file.path()).unwrap();
        assert!(normalized.is_absolute());
        assert!(normalize_path("/definitely/not/here.pdf").is_err());
    }

    #[test]
    fn test_format_date() {
        let timestamp = Local
            .with_ymd_and_hms(2026, 3, 7, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date(timestamp), "Mar 07, 2026");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("a longer title", 6), "a lon…");
    }
}
