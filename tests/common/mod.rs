//! Shared fixtures for the integration tests
#![allow(dead_code)]

use beauty_reader::api::RETENTION_DAYS;
use beauty_reader::error::{ReaderError, Result};
use beauty_reader::text::{ExtractedPages, TextExtractor};
use beauty_reader::{HistoryRepository, HistoryStore, PreferenceStore, ReaderController};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Treats the document as UTF-8 text with pages separated by form feeds.
/// Documents starting with `%broken` fail to parse.
pub struct FormFeedExtractor;

impl TextExtractor for FormFeedExtractor {
    fn extract(&self, mut reader: Box<dyn Read + Send>) -> Result<ExtractedPages> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        if text.starts_with("%broken") {
            return Err(ReaderError::Pdf("unreadable document".to_string()));
        }
        Ok(ExtractedPages {
            pages: text.split('\x0C').map(str::to_string).collect(),
        })
    }
}

pub struct Harness {
    pub controller: ReaderController,
    pub dir: TempDir,
}

impl Harness {
    pub fn preferences_path(&self) -> std::path::PathBuf {
        self.dir.path().join("preferences.json")
    }
}

pub fn harness() -> Harness {
    harness_with(Arc::new(FormFeedExtractor))
}

pub fn harness_with(extractor: Arc<dyn TextExtractor>) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let repository = HistoryRepository::new(HistoryStore::memory().unwrap()).unwrap();
    let preferences = PreferenceStore::open(dir.path().join("preferences.json")).unwrap();
    let controller = ReaderController::new(repository, preferences, extractor, RETENTION_DAYS);
    Harness { controller, dir }
}

/// Harness backed by a SQLite file so a second connection can tamper with it
pub fn harness_on_disk() -> (Harness, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("history.db");
    let repository = HistoryRepository::new(HistoryStore::open(&db_path).unwrap()).unwrap();
    let preferences = PreferenceStore::open(dir.path().join("preferences.json")).unwrap();
    let controller =
        ReaderController::new(repository, preferences, Arc::new(FormFeedExtractor), RETENTION_DAYS);
    (Harness { controller, dir }, db_path)
}

/// Write a form-feed document and return its canonical path
pub fn write_document(dir: &Path, name: &str, pages: &[&str]) -> String {
    let path = dir.join(name);
    std::fs::write(&path, pages.join("\x0C")).unwrap();
    path.canonicalize().unwrap().to_string_lossy().into_owned()
}

/// Write a real PDF with one line of text per page
pub fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages.len() as i64,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}
