//! Output formatter trait

use sage_application::{AnalysisReport, SummaryReport};
use sage_domain::{ArticleContent, Model};

/// Trait for formatting analysis results
pub trait OutputFormatter {
    /// Format the complete bias breakdown
    fn format(&self, report: &AnalysisReport) -> String;

    /// Format as reply-schema JSON
    fn format_json(&self, report: &AnalysisReport) -> String;

    /// Format bias, confidence, factuality and summary only
    fn format_brief(&self, report: &AnalysisReport) -> String;

    /// Format a neutral summary
    fn format_summary(&self, report: &SummaryReport) -> String;

    /// Format extracted article text
    fn format_extracted(&self, content: &ArticleContent) -> String;

    /// Format the model list
    fn format_models(&self, models: &[Model]) -> String;
}
