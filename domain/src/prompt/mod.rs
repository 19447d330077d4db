//! Prompt templates for bias analysis and neutral summaries.

pub mod template;

pub use template::PromptTemplate;
