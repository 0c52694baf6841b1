//! Interactive reading session
//!
//! A line-oriented loop: render the screen for the current state, read one
//! line, turn it into an [`Intent`] and hand it to the controller.

use crate::api::ReaderController;
use crate::error::Result;
use crate::ui::screens;
use crate::utils::{is_supported_document, normalize_path};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};
use std::time::Duration;

/// What the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Next,
    Previous,
    /// 1-based page number
    GoTo(i64),
    /// Bare number: a history entry on the home screen, a page in the reader
    Number(i64),
    /// Open a path, or ask for one
    Open(Option<String>),
    /// Delete the open document, or the 1-based history entry
    Delete(Option<usize>),
    Back,
    SetName(String),
    Help,
    Quit,
    Unknown(String),
}

impl Intent {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Intent> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let intent = match command.to_lowercase().as_str() {
            "n" | "next" => Intent::Next,
            "p" | "prev" | "previous" => Intent::Previous,
            "g" | "goto" => match rest.parse() {
                Ok(page) => Intent::GoTo(page),
                Err(_) => Intent::Unknown(line.to_string()),
            },
            "o" | "open" | "upload" => Intent::Open(arg),
            "d" | "delete" => match arg {
                None => Intent::Delete(None),
                Some(arg) => match arg.parse() {
                    Ok(position) => Intent::Delete(Some(position)),
                    Err(_) => Intent::Unknown(line.to_string()),
                },
            },
            "b" | "back" => Intent::Back,
            "name" => match arg {
                Some(name) => Intent::SetName(name),
                None => Intent::Unknown(line.to_string()),
            },
            "h" | "help" | "?" => Intent::Help,
            "q" | "quit" | "exit" => Intent::Quit,
            other => match other.parse() {
                Ok(number) if rest.is_empty() => Intent::Number(number),
                _ => Intent::Unknown(line.to_string()),
            },
        };
        Some(intent)
    }
}

/// Terminal front end over a [`ReaderController`]
pub struct ReaderApp<R, W> {
    controller: ReaderController,
    input: R,
    output: W,
    spinner: bool,
}

impl<R: BufRead, W: Write> ReaderApp<R, W> {
    pub fn new(controller: ReaderController, input: R, output: W) -> Self {
        Self {
            controller,
            input,
            output,
            spinner: true,
        }
    }

    /// Show a spinner while documents load (on by default)
    pub fn with_spinner(mut self, spinner: bool) -> Self {
        self.spinner = spinner;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user quits or input ends
    pub async fn run(&mut self) -> Result<()> {
        // History is pruned every time the session starts
        let _ = self.controller.prune_history().await;

        let has_name = self.controller.display_name().borrow().is_some();
        if !has_name && !self.prompt_name().await? {
            return Ok(());
        }

        loop {
            self.render()?;
            write!(self.output, "\n> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            let Some(intent) = Intent::parse(&line) else {
                continue;
            };
            if intent == Intent::Quit {
                writeln!(self.output, "👋 Goodbye!")?;
                break;
            }
            self.dispatch(intent).await?;
        }

        Ok(())
    }

    /// Open one document, then continue with the normal session
    pub async fn run_with_document(&mut self, path: &str) -> Result<()> {
        self.open_path(path).await?;
        self.run().await
    }

    async fn prompt_name(&mut self) -> Result<bool> {
        writeln!(self.output, "{}", screens::name_dialog())?;
        loop {
            write!(self.output, "Your Name: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            if let Some(handle) = self.controller.set_display_name(&line) {
                let _ = handle.await;
                return Ok(true);
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn render(&mut self) -> Result<()> {
        let name = self.controller.display_name().borrow().clone();
        let book = self.controller.book().borrow().clone();

        writeln!(self.output, "\n{}", screens::top_bar(name.as_deref(), book.is_some()))?;
        match book {
            Some(book) => {
                let page = *self.controller.current_page().borrow();
                writeln!(self.output, "{}", screens::reader_view(&book, page))?;
            }
            None => {
                let entries = self.controller.history().borrow().clone();
                writeln!(self.output, "{}", screens::home_screen(&entries))?;
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, intent: Intent) -> Result<()> {
        let reading = self.controller.book().borrow().is_some();
        let page = *self.controller.current_page().borrow() as i64;

        match intent {
            Intent::Next if reading => {
                self.controller.navigate_to_page(page + 1);
            }
            Intent::Previous if reading => {
                self.controller.navigate_to_page(page - 1);
            }
            Intent::GoTo(number) | Intent::Number(number) if reading => {
                self.controller.navigate_to_page(number.saturating_sub(1));
            }
            Intent::Number(position) => {
                let entry = usize::try_from(position)
                    .ok()
                    .and_then(|position| position.checked_sub(1))
                    .and_then(|index| self.controller.history().borrow().get(index).cloned());
                match entry {
                    Some(entry) => self.load(entry.uri).await,
                    None => writeln!(self.output, "No history entry {}", position)?,
                }
            }
            Intent::Open(path) => {
                let path = match path {
                    Some(path) => path,
                    None => {
                        write!(self.output, "Path to PDF: ")?;
                        self.output.flush()?;
                        match self.read_line()? {
                            Some(path) if !path.is_empty() => path,
                            _ => return Ok(()),
                        }
                    }
                };
                self.open_path(&path).await?;
            }
            Intent::Delete(None) if reading => {
                if let Some(handle) = self.controller.delete_current() {
                    let _ = handle.await;
                }
            }
            Intent::Delete(Some(position)) => {
                let entry = position
                    .checked_sub(1)
                    .and_then(|index| self.controller.history().borrow().get(index).cloned());
                match entry {
                    Some(entry) => {
                        let _ = self.controller.delete(&entry).await;
                    }
                    None => writeln!(self.output, "No history entry {}", position)?,
                }
            }
            Intent::Back => self.controller.navigate_back(),
            Intent::SetName(name) => {
                if let Some(handle) = self.controller.set_display_name(&name) {
                    let _ = handle.await;
                }
            }
            Intent::Help => writeln!(self.output, "{}", screens::help())?,
            Intent::Unknown(line) => {
                writeln!(self.output, "Unknown command: {} (h for help)", line)?;
            }
            Intent::Next | Intent::Previous | Intent::GoTo(_) | Intent::Delete(None) => {
                writeln!(self.output, "Open a document first")?;
            }
            Intent::Quit => {}
        }
        Ok(())
    }

    /// File picker flow: only existing PDF files are handed to the controller
    async fn open_path(&mut self, path: &str) -> Result<()> {
        if !is_supported_document(path) {
            writeln!(self.output, "Only PDF files can be opened: {}", path)?;
            return Ok(());
        }
        match normalize_path(path) {
            Ok(resolved) => {
                self.load(resolved.to_string_lossy().into_owned()).await;
                Ok(())
            }
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                Ok(())
            }
        }
    }

    async fn load(&mut self, reference: String) {
        let spinner = if self.spinner {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                spinner.set_style(style);
            }
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        } else {
            ProgressBar::hidden()
        };
        spinner.set_message(format!("Opening {}", reference));

        let _ = self.controller.load(reference).await;
        spinner.finish_and_clear();
    }
}
