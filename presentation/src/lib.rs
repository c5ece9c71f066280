//! Presentation layer for huddle
//!
//! This crate contains CLI definitions, output formatters,
//! and the progress spinner shown while a request is routed.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
