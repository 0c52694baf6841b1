//! beauty-reader CLI application
//!
//! Command-line interface for the beauty-reader library.

use anyhow::Context;
use beauty_reader::ui::{ReaderApp, screens};
use beauty_reader::{Config, ReaderController};
use clap::{Parser, Subcommand};
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "beauty-reader")]
#[command(about = "Read PDFs page by page and keep a history of what you opened")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the history database and preferences
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive reading session (default)
    Read,

    /// Open a PDF and start reading it
    Open {
        /// PDF file to open
        path: PathBuf,
    },

    /// List reading history
    History,

    /// Remove a document from the history
    Delete {
        /// Document reference as shown by `history`
        uri: String,
    },

    /// Remove history entries older than the retention window
    Prune,

    /// Show or change the display name
    Name {
        /// New display name
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let controller = ReaderController::open(&config).context("Failed to open reader storage")?;

    match cli.command.unwrap_or(Commands::Read) {
        Commands::Read => {
            let mut app = ReaderApp::new(controller, BufReader::new(io::stdin()), io::stdout());
            app.run().await?;
        }
        Commands::Open { path } => {
            let mut app = ReaderApp::new(controller, BufReader::new(io::stdin()), io::stdout());
            app.run_with_document(&path.to_string_lossy()).await?;
        }
        Commands::History => history_command(&controller).await?,
        Commands::Delete { uri } => delete_command(&controller, &uri).await?,
        Commands::Prune => prune_command(&controller, config.history.retention_days).await?,
        Commands::Name { name } => name_command(&controller, name).await?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::from_env(),
    };
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = data_dir.clone();
    }
    Ok(config)
}

async fn history_command(controller: &ReaderController) -> anyhow::Result<()> {
    let entries = controller.repository().list().await?;
    if entries.is_empty() {
        println!("{}", screens::empty_state());
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("{}\n    {}", screens::pdf_card(i + 1, entry), entry.uri);
    }
    Ok(())
}

async fn delete_command(controller: &ReaderController, uri: &str) -> anyhow::Result<()> {
    if controller.repository().delete(uri).await? {
        println!("🗑️  Removed {}", uri);
    } else {
        eprintln!("❌ Not in history: {}", uri);
    }
    Ok(())
}

async fn prune_command(controller: &ReaderController, retention_days: i64) -> anyhow::Result<()> {
    let removed = controller
        .repository()
        .delete_older_than_days(retention_days, chrono::Utc::now())
        .await?;
    println!(
        "🧹 Removed {} entries not opened in the last {} days",
        removed, retention_days
    );
    Ok(())
}

async fn name_command(controller: &ReaderController, name: Option<String>) -> anyhow::Result<()> {
    match name {
        Some(name) => match controller.set_display_name(&name) {
            Some(handle) => {
                if saved_display_name(controller, handle, &name).await? {
                    println!("✅ Display name set to {}", name.trim());
                } else {
                    eprintln!("❌ Failed to save display name (see log)");
                }
            }
            None => eprintln!("❌ Display name cannot be blank"),
        },
        None => {
            let current = controller.display_name().borrow().clone();
            match current {
                Some(name) => println!("{}", name),
                None => println!("(no display name set)"),
            }
        }
    }
    Ok(())
}

/// Wait for a display-name save and report whether it was published
async fn saved_display_name(
    controller: &ReaderController,
    handle: tokio::task::JoinHandle<()>,
    name: &str,
) -> anyhow::Result<bool> {
    handle.await?;
    let saved = controller.display_name().borrow().as_deref() == Some(name.trim());
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beauty_reader::api::RETENTION_DAYS;
    use beauty_reader::{HistoryRepository, HistoryStore, PdfProcessor, PreferenceStore};
    use std::sync::Arc;

    fn controller_with_preferences(path: PathBuf) -> ReaderController {
        let repository = HistoryRepository::new(HistoryStore::memory().unwrap()).unwrap();
        let preferences = PreferenceStore::open(path).unwrap();
        ReaderController::new(
            repository,
            preferences,
            Arc::new(PdfProcessor::new().unwrap()),
            RETENTION_DAYS,
        )
    }

    #[tokio::test]
    async fn test_saved_display_name_reports_outcome() {
        let temp_dir = tempfile::tempdir().unwrap();
        let controller = controller_with_preferences(temp_dir.path().join("preferences.json"));
        let handle = controller.set_display_name(" Ada ").unwrap();
        assert!(saved_display_name(&controller, handle, " Ada ").await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_display_name_save_is_not_reported_as_success() {
        let temp_dir = tempfile::tempdir().unwrap();
        let controller = controller_with_preferences(temp_dir.path().join("prefs").join("preferences.json"));
        // A plain file where the preferences directory should go
        std::fs::write(temp_dir.path().join("prefs"), "").unwrap();

        let handle = controller.set_display_name("Ada").unwrap();
        assert!(!saved_display_name(&controller, handle, "Ada").await.unwrap());
        assert!(controller.display_name().borrow().is_none());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["beauty-reader", "open", "book.pdf"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Open { .. })));

        let cli = Cli::try_parse_from(["beauty-reader", "--data-dir", "/tmp/r"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/r")));

        assert!(Cli::try_parse_from(["beauty-reader", "delete"]).is_err());
    }
}
