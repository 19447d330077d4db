//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_article;
pub mod extract_article;
pub mod resolve_content;
pub(crate) mod shared;
pub mod summarize;

#[cfg(test)]
pub(crate) mod test_support;
