//! Readability port
//!
//! Turns a page's HTML into its main article text.

/// The main content of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: Option<String>,
    pub text_content: String,
}

/// Port for main-content extraction from HTML.
pub trait ReadabilityPort: Send + Sync {
    /// Returns `None` when no article content could be identified.
    fn extract(&self, html: &str, base_url: &str) -> Option<ExtractedArticle>;
}
