//! Application layer for spectrum-sage
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    analysis_logger::{AnalysisEvent, AnalysisLogger, NoAnalysisLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    page_fetcher::{FetchError, FetchedPage, PageFetcher},
    pdf_text::{PdfError, PdfText, PdfTextPort},
    progress::{NoProgress, ProgressNotifier, Stage},
    readability::{ExtractedArticle, ReadabilityPort},
};
pub use use_cases::analyze_article::{
    AnalysisReport, AnalyzeArticleUseCase, AnalyzeError, AnalyzeInput,
};
pub use use_cases::extract_article::{
    AttemptError, ExtractArticleUseCase, ExtractError, ExtractedText, ProxyFailure,
};
pub use use_cases::resolve_content::{ResolveContentUseCase, ResolveError};
pub use use_cases::summarize::{SummarizeError, SummarizeUseCase, SummaryReport};
