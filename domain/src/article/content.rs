//! Validated article content.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Minimum number of characters for a meaningful analysis.
pub const MIN_CONTENT_CHARS: usize = 100;

/// Where the analysed text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ContentOrigin {
    /// Extracted from a web page through one of the fetch proxies.
    Url {
        url: String,
        proxy: String,
        title: Option<String>,
    },
    /// Pasted directly.
    Text,
    /// Read from a PDF text layer.
    Pdf { file_name: String, pages: usize },
}

impl std::fmt::Display for ContentOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentOrigin::Url { url, proxy, .. } => write!(f, "{} (via {})", url, proxy),
            ContentOrigin::Text => write!(f, "pasted text"),
            ContentOrigin::Pdf { file_name, pages } => {
                write!(f, "{} ({} pages)", file_name, pages)
            }
        }
    }
}

/// Article text that is long enough to analyse (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    text: String,
    origin: ContentOrigin,
}

impl ArticleContent {
    /// Create content, enforcing [`MIN_CONTENT_CHARS`].
    pub fn new(text: impl Into<String>, origin: ContentOrigin) -> Result<Self, DomainError> {
        Self::with_min_chars(text, origin, MIN_CONTENT_CHARS)
    }

    /// Create content with a stricter minimum. The floor is always
    /// [`MIN_CONTENT_CHARS`].
    pub fn with_min_chars(
        text: impl Into<String>,
        origin: ContentOrigin,
        min_chars: usize,
    ) -> Result<Self, DomainError> {
        let text = text.into();
        let min = min_chars.max(MIN_CONTENT_CHARS);
        let chars = text.chars().count();
        if chars < min {
            return Err(DomainError::ContentTooShort { chars, min });
        }
        Ok(Self { text, origin })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> &ContentOrigin {
        &self.origin
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Copy of the text cut to at most `max_chars` characters.
    ///
    /// Returns the text and whether anything was cut.
    pub fn truncated(&self, max_chars: usize) -> (String, bool) {
        match self.text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => (self.text[..byte_idx].to_string(), true),
            None => (self.text.clone(), false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_content() {
        let err = ArticleContent::new("a".repeat(99), ContentOrigin::Text).unwrap_err();
        assert_eq!(err, DomainError::ContentTooShort { chars: 99, min: 100 });
    }

    #[test]
    fn test_accepts_exact_minimum() {
        let content = ArticleContent::new("a".repeat(100), ContentOrigin::Text).unwrap();
        assert_eq!(content.char_count(), 100);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 60 two-byte characters: 120 bytes but only 60 chars
        let text = "ç".repeat(60);
        assert!(ArticleContent::new(text, ContentOrigin::Text).is_err());
    }

    #[test]
    fn test_min_chars_has_floor() {
        assert!(ArticleContent::with_min_chars("a".repeat(100), ContentOrigin::Text, 10).is_ok());
        assert!(ArticleContent::with_min_chars("a".repeat(100), ContentOrigin::Text, 150).is_err());
    }

    #[test]
    fn test_truncated_on_char_boundary() {
        let text = format!("{}{}", "é".repeat(100), "abc");
        let content = ArticleContent::new(text, ContentOrigin::Text).unwrap();
        let (cut, truncated) = content.truncated(101);
        assert!(truncated);
        assert_eq!(cut.chars().count(), 101);
        assert!(cut.ends_with('a'));

        let (full, truncated) = content.truncated(1000);
        assert!(!truncated);
        assert_eq!(full.chars().count(), 103);
    }

    #[test]
    fn test_origin_display() {
        let origin = ContentOrigin::Pdf {
            file_name: "report.pdf".into(),
            pages: 3,
        };
        assert_eq!(origin.to_string(), "report.pdf (3 pages)");
    }
}
