//! Terminal presentation layer

pub mod app;
pub mod screens;

pub use app::{Intent, ReaderApp};
