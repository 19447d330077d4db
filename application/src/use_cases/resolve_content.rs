//! Resolve Content use case.
//!
//! Turns what the user submitted into validated [`ArticleContent`]:
//!
//! | Input | Steps |
//! |-------|-------|
//! | Link | URL check → proxy extraction → length check |
//! | Text | trim → empty check → length check |
//! | PDF | empty check → page walk → length check |

use crate::ports::pdf_text::{PdfError, PdfText, PdfTextPort};
use crate::ports::progress::{ProgressNotifier, Stage};
use crate::use_cases::extract_article::{ExtractArticleUseCase, ExtractError};
use sage_domain::{
    ArticleContent, ArticleInput, ContentOrigin, DomainError, MIN_CONTENT_CHARS, validate_url,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors while resolving article content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Could not read the PDF file.")]
    Pdf(#[source] PdfError),
}

/// Use case for resolving article input into content.
pub struct ResolveContentUseCase {
    extractor: ExtractArticleUseCase,
    pdf: Arc<dyn PdfTextPort>,
    min_content_chars: usize,
}

impl ResolveContentUseCase {
    pub fn new(extractor: ExtractArticleUseCase, pdf: Arc<dyn PdfTextPort>) -> Self {
        Self {
            extractor,
            pdf,
            min_content_chars: MIN_CONTENT_CHARS,
        }
    }

    pub fn with_min_content_chars(mut self, min_chars: usize) -> Self {
        self.min_content_chars = min_chars.max(MIN_CONTENT_CHARS);
        self
    }

    /// Resolve input into content, reporting the [`Stage::Extract`] stage.
    pub async fn execute(
        &self,
        input: ArticleInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ArticleContent, ResolveError> {
        info!("Resolving {} input: {}", input.mode(), input.describe());
        progress.on_stage_start(Stage::Extract);

        let result = self.resolve(input, progress).await;
        match &result {
            Ok(content) => {
                debug!("Resolved {} chars from {}", content.char_count(), content.origin());
                progress.on_stage_complete(Stage::Extract);
            }
            Err(e) => {
                debug!("Resolve failed: {}", e);
                progress.on_stage_failed(Stage::Extract);
            }
        }
        result
    }

    async fn resolve(
        &self,
        input: ArticleInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ArticleContent, ResolveError> {
        let (text, origin) = match input {
            ArticleInput::Url(raw) => {
                let url = validate_url(&raw)?;
                let extracted = self.extractor.execute(&url, progress).await?;
                (
                    extracted.text,
                    ContentOrigin::Url {
                        url,
                        proxy: extracted.proxy,
                        title: extracted.title,
                    },
                )
            }
            ArticleInput::Text(raw) => {
                let text = raw.trim();
                if text.is_empty() {
                    return Err(DomainError::EmptyText.into());
                }
                (text.to_string(), ContentOrigin::Text)
            }
            ArticleInput::Pdf { file_name, bytes } => {
                if bytes.is_empty() {
                    return Err(DomainError::MissingPdf.into());
                }
                let pdf = self.read_pdf(bytes).await?;
                (
                    pdf.joined(),
                    ContentOrigin::Pdf {
                        file_name,
                        pages: pdf.page_count(),
                    },
                )
            }
        };

        Ok(ArticleContent::with_min_chars(
            text,
            origin,
            self.min_content_chars,
        )?)
    }

    /// PDF parsing is CPU-bound; keep it off the async workers.
    async fn read_pdf(&self, bytes: Vec<u8>) -> Result<PdfText, ResolveError> {
        let reader = Arc::clone(&self.pdf);
        tokio::task::spawn_blocking(move || reader.read_text(&bytes))
            .await
            .map_err(|e| ResolveError::Pdf(PdfError::Malformed(e.to_string())))?
            .map_err(ResolveError::Pdf)
    }
}
