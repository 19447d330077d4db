//! Presentation layer for spectrum-sage
//!
//! This crate contains CLI definitions, input resolution, output formatters
//! and progress reporters.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, InputArgs, OutputFormat};
pub use cli::input::{InputError, resolve_input};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
