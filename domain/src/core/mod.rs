//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — LLM model identifier with provider-family inference
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
