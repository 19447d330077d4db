//! Domain layer for spectrum-sage
//!
//! This crate contains the core value objects, prompt templates and reply
//! parsing. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Article**: what the user submitted ([`ArticleInput`]) and the text that
//!   passed validation ([`ArticleContent`])
//! - **Analysis**: the bias breakdown returned by the model ([`BiasAnalysis`])
//! - **Extraction**: the fetch proxies used for links ([`ProxyEndpoint`])

pub mod analysis;
pub mod article;
pub mod config;
pub mod core;
pub mod extraction;
pub mod parsing;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use analysis::{BiasAnalysis, BiasLabel, Confidence, Factuality, NeutralSummary};
pub use article::{
    content::{ArticleContent, ContentOrigin, MIN_CONTENT_CHARS},
    entities::{ArticleInput, InputMode, validate_url},
};
pub use config::OutputFormat;
pub use core::{error::DomainError, model::Model};
pub use extraction::{ProxyEndpoint, ProxyError, ProxyKind};
pub use parsing::{ReplyError, parse_bias_analysis, parse_neutral_summary};
pub use prompt::PromptTemplate;
