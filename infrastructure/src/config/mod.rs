//! Configuration file loading for spectrum-sage
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SAGE_` environment variables (`SAGE_ANALYSIS__MODEL=gpt-4o`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./sage.toml` or `./.sage.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/spectrum-sage/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigIssueCode, FileAnalysisConfig, FileAnthropicConfig, FileConfig,
    FileExtractionConfig, FileGeminiConfig, FileLoggingConfig, FileOllamaConfig,
    FileOpenAiConfig, FileOutputConfig, FileProvidersConfig, FileProxyConfig, Severity,
};
pub use loader::ConfigLoader;
