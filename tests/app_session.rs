//! Scripted terminal sessions

mod common;

use beauty_reader::ReaderController;
use beauty_reader::ui::ReaderApp;
use common::{harness, write_document};
use std::io::Cursor;

async fn run_session(controller: &ReaderController, input: &str) -> String {
    let mut app = ReaderApp::new(controller.clone(), Cursor::new(input.as_bytes()), Vec::new())
        .with_spinner(false);
    app.run().await.unwrap();
    String::from_utf8(app.into_output()).unwrap()
}

#[tokio::test]
async fn test_first_run_asks_for_name_then_reads() {
    let h = harness();
    let doc = write_document(h.dir.path(), "story.pdf", &["once", "upon", "a time"]);

    let script = format!("\n  \nAda\no {}\nn\nn\nn\nq\n", doc);
    let output = run_session(&h.controller, &script).await;

    assert!(output.contains("Welcome to Beauty Reader"));
    assert!(output.contains("Welcome, Ada"));
    assert!(output.contains("Your Reading Journey Starts Here"));
    assert!(output.contains("Page 1 of 3"));
    assert!(output.contains("Page 3 of 3"));
    assert!(output.contains("a time"));
    assert!(output.contains("Goodbye"));

    assert_eq!(h.controller.display_name().borrow().as_deref(), Some("Ada"));
    assert_eq!(*h.controller.current_page().borrow(), 2);
    assert_eq!(h.controller.history().borrow().len(), 1);
}

#[tokio::test]
async fn test_input_ending_during_name_prompt() {
    let h = harness();
    let output = run_session(&h.controller, "").await;

    assert!(output.contains("Enter your name to get started"));
    assert!(h.controller.display_name().borrow().is_none());
}

#[tokio::test]
async fn test_home_screen_guards() {
    let h = harness();
    h.controller.set_display_name("Lin").unwrap().await.unwrap();

    let output = run_session(&h.controller, "1\nn\nopen notes.txt\nfly\nq\n").await;

    assert!(!output.contains("Welcome to Beauty Reader"));
    assert!(output.contains("No history entry 1"));
    assert!(output.contains("Open a document first"));
    assert!(output.contains("Only PDF files can be opened: notes.txt"));
    assert!(output.contains("Unknown command: fly"));
}

#[tokio::test]
async fn test_reopen_from_history_and_delete() {
    let h = harness();
    h.controller.set_display_name("Lin").unwrap().await.unwrap();
    let doc = write_document(h.dir.path(), "journal.pdf", &["monday", "tuesday"]);
    h.controller.load(doc).await.unwrap();
    h.controller.navigate_back();

    let output = run_session(&h.controller, "1\ng 2\nd\nq\n").await;

    assert!(output.contains(" 1. journal.pdf"));
    assert!(output.contains("Page 2 of 2"));
    assert!(output.contains("tuesday"));
    assert!(h.controller.book().borrow().is_none());
    assert!(h.controller.history().borrow().is_empty());
}
