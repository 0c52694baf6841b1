//! Text screens
//!
//! Every function here is pure: state in, text out. The session loop in
//! `ui::app` decides which screen to show and writes it to the terminal.

use crate::storage::HistoryEntry;
use crate::text::BookContent;
use crate::utils::{format_date, truncate_chars};

const WIDTH: usize = 60;
const TITLE_CHARS: usize = 48;

fn rule() -> String {
    "─".repeat(WIDTH)
}

/// Greeting plus the actions available on the current screen
pub fn top_bar(display_name: Option<&str>, has_document: bool) -> String {
    let mut actions = vec!["[o] Upload PDF"];
    if has_document {
        actions.push("[d] Delete");
        actions.push("[b] Back");
    }
    actions.push("[h] Help");
    actions.push("[q] Quit");

    format!(
        "📖 Welcome, {}\n{}\n{}",
        display_name.unwrap_or("Reader"),
        actions.join("  "),
        rule()
    )
}

/// Shown when there is no reading history
pub fn empty_state() -> String {
    [
        "",
        "Your Reading Journey Starts Here",
        "Upload a PDF to begin reading",
        "",
        "Type `o <path>` to open a PDF.",
    ]
    .join("\n")
}

/// One history entry as a list card
pub fn pdf_card(position: usize, entry: &HistoryEntry) -> String {
    format!(
        "{:>2}. {}\n    Added {}",
        position,
        truncate_chars(&entry.title, TITLE_CHARS),
        format_date(entry.saved_at)
    )
}

/// History list, or the empty state
pub fn home_screen(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return empty_state();
    }

    let cards: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| pdf_card(i + 1, entry))
        .collect();
    format!(
        "{}\n\nType a number to read, `d <number>` to remove.",
        cards.join("\n")
    )
}

/// "Page x of y" with previous/next enabled only where there is a page to go to
pub fn page_controls(current_page: usize, total_pages: usize) -> String {
    let previous = if current_page > 0 { "◀ [p] Previous" } else { "  (first page)" };
    let next = if current_page + 1 < total_pages { "[n] Next ▶" } else { "(last page)  " };
    format!(
        "{}   Page {} of {}   {}",
        previous,
        current_page + 1,
        total_pages,
        next
    )
}

/// Title, the text of the current page and the page controls
pub fn reader_view(book: &BookContent, current_page: usize) -> String {
    let text = match book.page(current_page) {
        Some(text) if !text.trim().is_empty() => text,
        _ => "(no text on this page)",
    };

    format!(
        "{}\n{}\n{}\n{}\n{}",
        truncate_chars(&book.title, WIDTH),
        rule(),
        text,
        rule(),
        page_controls(current_page, book.total_pages)
    )
}

/// Onboarding prompt for the display name
pub fn name_dialog() -> String {
    ["Welcome to Beauty Reader", "Enter your name to get started"].join("\n")
}

pub fn help() -> String {
    [
        "Commands:",
        "  o <path>     open a PDF (o alone asks for a path)",
        "  <number>     home: open that entry, reader: go to that page",
        "  n / p        next / previous page",
        "  g <page>     go to page",
        "  d [number]   delete the open document, or a history entry",
        "  b            back to the history list",
        "  name <name>  change your display name",
        "  q            quit",
    ]
    .join("\n")
}
