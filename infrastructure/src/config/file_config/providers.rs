//! Provider configuration from TOML (`[providers]` section)

use super::issue::{ConfigIssue, ConfigIssueCode};
use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Read an API key: the inline value wins, then the named env var.
fn resolve_key(api_key: &Option<String>, api_key_env: &str) -> Option<String> {
    api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .or_else(|| {
            std::env::var(api_key_env)
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
        })
}

/// Serialize an inline key as `***` so config dumps never show it.
fn redact_key<S: Serializer>(api_key: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match api_key {
        Some(_) => serializer.serialize_some("***"),
        None => serializer.serialize_none(),
    }
}

/// Google Gemini API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    #[serde(serialize_with = "redact_key")]
    pub api_key: Option<String>,
    pub base_url: String,
    pub max_output_tokens: Option<u32>,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_output_tokens: None,
        }
    }
}

impl FileGeminiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(&self.api_key, &self.api_key_env)
    }
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    #[serde(serialize_with = "redact_key")]
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API (any compatible endpoint works).
    pub base_url: String,
    pub max_tokens: Option<u32>,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            max_tokens: None,
        }
    }
}

impl FileOpenAiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(&self.api_key, &self.api_key_env)
    }
}

/// Anthropic API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    #[serde(serialize_with = "redact_key")]
    pub api_key: Option<String>,
    pub base_url: String,
    /// Max tokens per response (required by the Messages API).
    pub max_tokens: u32,
    /// Anthropic API version header.
    pub api_version: String,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 4096,
            api_version: "2023-06-01".to_string(),
        }
    }
}

impl FileAnthropicConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(&self.api_key, &self.api_key_env)
    }
}

/// Local Ollama server. Needs no key, so it is opt-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    pub enabled: bool,
    pub endpoint: String,
    /// Models advertised by `sage models`.
    pub models: Vec<String>,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "http://localhost:11434".to_string(),
            models: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Default provider: "gemini", "openai", "anthropic", "ollama".
    pub default: Option<String>,
    pub gemini: FileGeminiConfig,
    pub openai: FileOpenAiConfig,
    pub anthropic: FileAnthropicConfig,
    pub ollama: FileOllamaConfig,
    /// Explicit model → provider routing overrides.
    pub routing: HashMap<String, String>,
}

impl FileProvidersConfig {
    pub fn default_kind(&self) -> ProviderKind {
        self.default
            .as_deref()
            .and_then(|name| name.parse().ok())
            .unwrap_or_default()
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Some(name) = &self.default
            && name.parse::<ProviderKind>().is_err()
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownProvider {
                    field: "providers.default".to_string(),
                    value: name.clone(),
                },
                format!(
                    "providers.default: unknown provider '{}', falling back to '{}'",
                    name,
                    ProviderKind::default()
                ),
            ));
        }

        let mut routes: Vec<_> = self.routing.iter().collect();
        routes.sort();
        for (model, provider) in routes {
            if provider.parse::<ProviderKind>().is_err() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider {
                        field: format!("providers.routing.{}", model),
                        value: provider.clone(),
                    },
                    format!(
                        "providers.routing: unknown provider '{}' for model '{}', ignoring",
                        provider, model
                    ),
                ));
            }
        }

        issues
    }
}
