//! Analysis configuration from TOML (`[analysis]` section)

use super::issue::{ConfigIssue, ConfigIssueCode};
use sage_application::BehaviorConfig;
use sage_application::config::DEFAULT_MAX_CONTENT_CHARS;
use sage_domain::{MIN_CONTENT_CHARS, Model};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalysisConfig {
    /// Model for the bias analysis (default: gemini-2.0-flash).
    pub model: Option<String>,
    /// Model for the neutral summary (default: same as `model`).
    pub summary_model: Option<String>,
    /// Minimum article length in characters. Values below 100 are raised to 100.
    pub min_content_chars: usize,
    /// Article text beyond this length is cut before prompting.
    pub max_content_chars: usize,
    /// Give up on the model after this many seconds (default: no limit).
    pub timeout_seconds: Option<u64>,
}

impl Default for FileAnalysisConfig {
    fn default() -> Self {
        Self {
            model: None,
            summary_model: None,
            min_content_chars: MIN_CONTENT_CHARS,
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            timeout_seconds: None,
        }
    }
}

fn parse_model(raw: Option<&str>) -> Option<Model> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Model::new)
}

impl FileAnalysisConfig {
    /// The analysis model, falling back to the built-in default.
    pub fn analysis_model(&self) -> Model {
        parse_model(self.model.as_deref()).unwrap_or_default()
    }

    /// The summary model, falling back to the analysis model.
    pub fn summary_model(&self) -> Model {
        parse_model(self.summary_model.as_deref()).unwrap_or_else(|| self.analysis_model())
    }

    pub fn to_behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig::default()
            .with_optional_timeout(self.timeout_seconds)
            .with_content_bounds(self.min_content_chars, self.max_content_chars)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("analysis.model", &self.model),
            ("analysis.summary_model", &self.summary_model),
        ] {
            if let Some(v) = value
                && v.trim().is_empty()
            {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyModelName {
                        field: field.to_string(),
                    },
                    format!("{}: empty model name, using the default", field),
                ));
            }
        }

        if self.min_content_chars < MIN_CONTENT_CHARS {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ContentBounds,
                format!(
                    "analysis.min_content_chars: {} is below the minimum of {}, using {}",
                    self.min_content_chars, MIN_CONTENT_CHARS, MIN_CONTENT_CHARS
                ),
            ));
        }

        if self.max_content_chars < self.min_content_chars.max(MIN_CONTENT_CHARS) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ContentBounds,
                format!(
                    "analysis.max_content_chars ({}) is smaller than analysis.min_content_chars ({})",
                    self.max_content_chars, self.min_content_chars
                ),
            ));
        }

        issues
    }
}
