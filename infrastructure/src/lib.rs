//! Infrastructure layer for spectrum-sage
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;
pub mod pdf;
pub mod providers;
pub mod readability;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use http::ReqwestPageFetcher;
pub use logging::JsonlAnalysisLogger;
pub use pdf::LopdfTextReader;
pub use providers::{ProviderAdapter, ProviderKind, RoutingGateway, build_providers, provider_client};
pub use readability::ScraperReadability;
