//! High-level API for beauty-reader
//!
//! This module provides the reader controller and the history repository
//! it persists through.

pub mod controller;
pub mod repository;

pub use controller::{ReaderController, clamp_page};
pub use repository::{HistoryRepository, RETENTION_DAYS};
