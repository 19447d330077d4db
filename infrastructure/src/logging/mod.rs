//! Structured analysis logging

pub mod jsonl_analysis_logger;

pub use jsonl_analysis_logger::JsonlAnalysisLogger;
