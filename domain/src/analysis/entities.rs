//! Analysis result entities.

use super::value_objects::{BiasLabel, Confidence, Factuality};
use serde::{Deserialize, Serialize};

/// The full bias breakdown of one article.
///
/// Field names serialize in the same camelCase shape the model is asked to
/// reply with, so `--output json` mirrors the reply schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasAnalysis {
    pub overall_bias: BiasLabel,
    #[serde(rename = "confidenceBias")]
    pub confidence: Confidence,
    pub factuality: Factuality,
    pub article_summary: String,
    pub left_perspective: String,
    pub center_perspective: String,
    pub right_perspective: String,
}

impl BiasAnalysis {
    /// The three perspectives in spectrum order with their labels.
    pub fn perspectives(&self) -> [(BiasLabel, &str); 3] {
        [
            (BiasLabel::Left, self.left_perspective.as_str()),
            (BiasLabel::Center, self.center_perspective.as_str()),
            (BiasLabel::Right, self.right_perspective.as_str()),
        ]
    }
}

/// A short neutral summary of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeutralSummary {
    pub summary: String,
}

impl NeutralSummary {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
        }
    }
}
