//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod analysis;
mod extraction;
mod issue;
mod logging;
mod output;
mod providers;

pub use analysis::FileAnalysisConfig;
pub use extraction::{FileExtractionConfig, FileProxyConfig};
pub use issue::{ConfigIssue, ConfigIssueCode, Severity};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use providers::{
    FileAnthropicConfig, FileGeminiConfig, FileOllamaConfig, FileOpenAiConfig,
    FileProvidersConfig,
};

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub analysis: FileAnalysisConfig,
    pub extraction: FileExtractionConfig,
    pub providers: FileProvidersConfig,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.analysis.validate());
        issues.extend(self.extraction.endpoints().1);
        issues.extend(self.providers.validate());
        issues
    }
}
