//! Text extraction from generated PDFs

mod common;

use beauty_reader::error::ReaderError;
use beauty_reader::text::{PdfProcessor, TextExtractor};
use common::{harness_with, write_pdf};
use std::sync::Arc;

#[test]
fn test_extracts_pages_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("alphabet.pdf");
    write_pdf(&path, &["Alpha", "Bravo", "Charlie"]);

    let processor = PdfProcessor::new()?;
    let extracted = processor.extract(Box::new(std::fs::File::open(&path)?))?;

    assert_eq!(extracted.page_count(), 3);
    assert!(extracted.pages[0].contains("Alpha"));
    assert!(extracted.pages[1].contains("Bravo"));
    assert!(extracted.pages[2].contains("Charlie"));
    Ok(())
}

#[test]
fn test_empty_input_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let processor = PdfProcessor::new()?;
    let result = processor.extract(Box::new(std::io::empty()));
    assert!(matches!(result, Err(ReaderError::Pdf(_))));
    Ok(())
}

#[tokio::test]
async fn test_controller_reads_real_pdf() -> Result<(), Box<dyn std::error::Error>> {
    let h = harness_with(Arc::new(PdfProcessor::new()?));
    let path = h.dir.path().join("report.pdf");
    write_pdf(&path, &["Intro", "Body", "Summary"]);
    let reference = path.to_string_lossy().into_owned();

    h.controller.load(reference.clone()).await?;

    let book = h.controller.book().borrow().clone().expect("book loaded");
    assert_eq!(book.title, "report.pdf");
    assert_eq!(book.total_pages, 3);
    assert_eq!(h.controller.navigate_to_page(10), 2);

    let entry = h.controller.repository().get(&reference).await?.expect("history entry");
    assert_eq!(entry.title, "report.pdf");

    // file:// references resolve to the same document
    h.controller.load(format!("file://{}", reference)).await?;
    assert_eq!(h.controller.book().borrow().as_ref().unwrap().total_pages, 3);
    Ok(())
}
