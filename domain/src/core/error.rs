//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// The display strings are the messages shown to the user, so they are
/// phrased as instructions rather than diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Please enter a valid URL.")]
    InvalidUrl(String),

    #[error("Please enter some text to analyze.")]
    EmptyText,

    #[error("Please select a PDF file.")]
    MissingPdf,

    #[error("The content is too short for a meaningful analysis.")]
    ContentTooShort { chars: usize, min: usize },

    #[error("Confidence must be between 0 and 100, got {0}")]
    InvalidConfidence(u32),
}
