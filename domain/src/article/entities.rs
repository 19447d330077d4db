//! Raw article input as submitted by the user.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The three ways an article can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Link,
    Text,
    Pdf,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InputMode::Link => "link",
            InputMode::Text => "text",
            InputMode::Pdf => "pdf",
        };
        write!(f, "{}", name)
    }
}

/// Article input before any extraction or validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleInput {
    /// A link to the article page.
    Url(String),
    /// Pasted article text.
    Text(String),
    /// Raw bytes of an uploaded PDF.
    Pdf { file_name: String, bytes: Vec<u8> },
}

impl ArticleInput {
    pub fn mode(&self) -> InputMode {
        match self {
            ArticleInput::Url(_) => InputMode::Link,
            ArticleInput::Text(_) => InputMode::Text,
            ArticleInput::Pdf { .. } => InputMode::Pdf,
        }
    }

    /// Short human-readable description for logs.
    pub fn describe(&self) -> String {
        match self {
            ArticleInput::Url(url) => url.clone(),
            ArticleInput::Text(text) => format!("{} chars of text", text.chars().count()),
            ArticleInput::Pdf { file_name, bytes } => {
                format!("{} ({} bytes)", file_name, bytes.len())
            }
        }
    }
}

/// Validate a user-supplied article URL.
///
/// Mirrors the form check: the trimmed input must be non-empty and start
/// with `http`. Returns the trimmed URL.
pub fn validate_url(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.starts_with("http") {
        return Err(DomainError::InvalidUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
