//! PDF text port
//!
//! Reads the text layer of a PDF held in memory.

use thiserror::Error;

/// Errors while reading a PDF text layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PdfError {
    #[error("Not a readable PDF: {0}")]
    Malformed(String),

    #[error("The PDF is encrypted")]
    Encrypted,

    #[error("Failed to read page {page}: {message}")]
    Page { page: u32, message: String },
}

/// Text of a PDF, one entry per page in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfText {
    pub pages: Vec<String>,
}

impl PdfText {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages concatenated, each followed by a newline.
    pub fn joined(&self) -> String {
        let mut text = String::new();
        for page in &self.pages {
            text.push_str(page);
            text.push('\n');
        }
        text
    }
}

/// Port for PDF text extraction.
pub trait PdfTextPort: Send + Sync {
    fn read_text(&self, bytes: &[u8]) -> Result<PdfText, PdfError>;
}
