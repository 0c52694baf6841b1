//! Document references
//!
//! A reference is an opaque string chosen by the user: a filesystem path or
//! a `file://` URI.

use crate::error::{ReaderError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use url::Url;

/// Title used when a reference has no usable last segment
pub const UNKNOWN_TITLE: &str = "Unknown Book";

/// Parse `reference` as a URL if it carries a scheme separator.
/// Bare paths (including `C:\...`) are left alone.
fn parse_url(reference: &str) -> Option<Result<Url>> {
    reference.contains("://").then(|| {
        Url::parse(reference)
            .map_err(|e| ReaderError::Generic(format!("invalid document reference {}: {}", reference, e)))
    })
}

/// Resolve a reference to a local path
pub fn resolve_path(reference: &str) -> Result<PathBuf> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(ReaderError::Generic("empty document reference".to_string()));
    }

    match parse_url(trimmed) {
        Some(url) => {
            let url = url?;
            if url.scheme() != "file" {
                return Err(ReaderError::Generic(format!("unsupported scheme: {}", url.scheme())));
            }
            // Fails for hosts other than localhost
            url.to_file_path()
                .map_err(|_| ReaderError::Generic(format!("not a local file: {}", trimmed)))
        }
        None => Ok(PathBuf::from(trimmed)),
    }
}

/// Open the referenced document for reading
pub fn open_document(reference: &str) -> Result<BufReader<File>> {
    let path = resolve_path(reference)?;
    let file = File::open(&path)?;
    Ok(BufReader::new(file))
}

/// Last path segment of the reference, or [`UNKNOWN_TITLE`]
pub fn title_for(reference: &str) -> String {
    let trimmed = reference.trim();
    let segment = match parse_url(trimmed) {
        Some(Ok(url)) if url.scheme() == "file" => url
            .to_file_path()
            .ok()
            .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned())),
        _ => trimmed
            .trim_end_matches('/')
            .rsplit(['/', '\\'])
            .next()
            .map(str::to_string),
    };

    segment
        .filter(|segment| !segment.is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}
