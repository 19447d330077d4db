//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod analysis_logger;
pub mod llm_gateway;
pub mod page_fetcher;
pub mod pdf_text;
pub mod progress;
pub mod readability;
