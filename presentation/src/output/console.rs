//! Console output formatter for bias reports

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use sage_application::{AnalysisReport, SummaryReport};
use sage_domain::{ArticleContent, BiasLabel, Confidence, ContentOrigin, Model, OutputFormat};

const DISCLAIMER: &str = "This breakdown is AI-generated and interpretive. \
It describes how the article is framed, not whether its claims are true. \
Read the source and other coverage before drawing conclusions.";

/// Formats analysis results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a report in the requested format.
    pub fn render(report: &AnalysisReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(report),
            OutputFormat::Brief => Self::format_brief(report),
            OutputFormat::Json => Self::format_json(report),
        }
    }

    /// Format the complete bias breakdown
    pub fn format(report: &AnalysisReport) -> String {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&Self::header("Spectrum Sage Analysis"));
        output.push('\n');

        output.push_str(&Self::source_lines(&report.origin));
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), report.model));
        if report.truncated {
            output.push_str(&format!(
                "{}\n",
                format!(
                    "Only the beginning of the article was analyzed ({} characters in total).",
                    report.content_chars
                )
                .yellow()
            ));
        }

        output.push_str(&Self::section_header("Assessment"));
        output.push_str(&Self::scores(report));

        output.push_str(&Self::section_header("Neutral Summary"));
        output.push_str(&format!("\n{}\n", analysis.article_summary));

        output.push_str(&Self::section_header("Perspectives"));
        for (label, text) in analysis.perspectives() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", label.display_name()).bold(),
                Self::indent(text, "  ")
            ));
        }

        output.push_str(&format!("\n{}\n", DISCLAIMER.dimmed().italic()));
        output.push_str(&Self::footer());

        output
    }

    /// Format as reply-schema JSON
    pub fn format_json(report: &AnalysisReport) -> String {
        serde_json::to_string_pretty(&report.analysis).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format bias, confidence, factuality and summary only
    pub fn format_brief(report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Spectrum Sage ===".cyan().bold()));
        output.push_str(&Self::scores(report));
        output.push('\n');
        output.push_str(&report.analysis.article_summary);
        output.push('\n');

        output
    }

    /// Format a neutral summary
    pub fn format_summary(report: &SummaryReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Neutral Summary ===".cyan().bold()));
        output.push_str(&Self::source_lines(&report.origin));
        output.push_str(&format!("{} {}\n\n", "Model:".dimmed(), report.model));
        output.push_str(&report.summary.summary);
        output.push('\n');

        output
    }

    /// Format extracted article text
    pub fn format_extracted(content: &ArticleContent) -> String {
        let mut output = Self::source_lines(content.origin());
        output.push_str(&format!(
            "{} {}\n\n",
            "Characters:".cyan().bold(),
            content.char_count()
        ));
        output.push_str(content.text());
        output.push('\n');
        output
    }

    /// Format the model list
    pub fn format_models(models: &[Model]) -> String {
        if models.is_empty() {
            return format!(
                "{}\n",
                "No models available. Set an API key such as GEMINI_API_KEY.".yellow()
            );
        }

        let mut output = format!("{}\n", "Available models:".cyan().bold());
        for model in models {
            output.push_str(&format!("  * {}\n", model));
        }
        output
    }

    /// Confidence bar with ten cells, rounded to the nearest cell.
    pub fn confidence_bar(confidence: Confidence) -> String {
        let percent = u32::from(confidence);
        let filled = ((percent + 5) / 10) as usize;
        format!(
            "[{}{}] {}%",
            "#".repeat(filled),
            "-".repeat(10 - filled),
            percent
        )
    }

    fn bias_colored(label: BiasLabel) -> ColoredString {
        let name = label.display_name();
        match label.lean() {
            i8::MIN..=-1 => name.blue().bold(),
            0 => name.white().bold(),
            _ => name.red().bold(),
        }
    }

    fn scores(report: &AnalysisReport) -> String {
        let analysis = &report.analysis;
        format!(
            "{} {}\n{} {}\n{} {}\n",
            "Overall bias:".bold(),
            Self::bias_colored(analysis.overall_bias),
            "Confidence:  ".bold(),
            Self::confidence_bar(analysis.confidence),
            "Factuality:  ".bold(),
            analysis.factuality.display_name()
        )
    }

    fn source_lines(origin: &ContentOrigin) -> String {
        match origin {
            ContentOrigin::Url { url, proxy, title } => {
                let mut lines = String::new();
                if let Some(title) = title {
                    lines.push_str(&format!("{} {}\n", "Title:".cyan().bold(), title));
                }
                lines.push_str(&format!(
                    "{} {} {}\n",
                    "Source:".cyan().bold(),
                    url,
                    format!("(via {})", proxy).dimmed()
                ));
                lines
            }
            other => format!("{} {}\n", "Source:".cyan().bold(), other),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &AnalysisReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &AnalysisReport) -> String {
        Self::format_json(report)
    }

    fn format_brief(&self, report: &AnalysisReport) -> String {
        Self::format_brief(report)
    }

    fn format_summary(&self, report: &SummaryReport) -> String {
        Self::format_summary(report)
    }

    fn format_extracted(&self, content: &ArticleContent) -> String {
        Self::format_extracted(content)
    }

    fn format_models(&self, models: &[Model]) -> String {
        Self::format_models(models)
    }
}
