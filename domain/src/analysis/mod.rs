//! Bias analysis result types.
//!
//! - [`value_objects`] — [`BiasLabel`], [`Factuality`], [`Confidence`]
//! - [`entities`] — [`BiasAnalysis`] and [`NeutralSummary`]

pub mod entities;
pub mod value_objects;

pub use entities::{BiasAnalysis, NeutralSummary};
pub use value_objects::{BiasLabel, Confidence, Factuality, UnknownLabel};
