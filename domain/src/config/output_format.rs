//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full breakdown: scores, summary and all three perspectives (default)
    #[default]
    Full,
    /// Bias, confidence, factuality and summary only
    Brief,
    /// The reply-schema JSON
    Json,
}
