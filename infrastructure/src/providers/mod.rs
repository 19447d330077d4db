//! LLM provider adapters
//!
//! Each provider speaks one HTTP chat API. [`RoutingGateway`] picks the
//! provider for a model and is what the application sees as its
//! [`LlmGateway`](sage_application::ports::llm_gateway::LlmGateway).

mod anthropic;
mod gemini;
mod http;
mod ollama;
mod openai;
pub mod routing;

pub use routing::RoutingGateway;

use crate::config::FileProvidersConfig;
use async_trait::async_trait;
use sage_application::ports::llm_gateway::{GatewayError, LlmSession};
use sage_domain::Model;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenAi,
    Anthropic,
    Ollama,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Gemini,
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Ollama,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Ollama => "ollama",
        }
    }

    /// The provider serving a model family, if the name reveals one.
    pub fn infer(model: &Model) -> Option<ProviderKind> {
        if model.is_gemini() {
            Some(ProviderKind::Gemini)
        } else if model.is_claude() {
            Some(ProviderKind::Anthropic)
        } else if model.is_gpt() {
            Some(ProviderKind::OpenAi)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "ollama" => Ok(ProviderKind::Ollama),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;
    fn supports_model(&self, model: &Model) -> bool;
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError>;
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
    /// Session that asks the provider for a JSON object reply.
    async fn create_structured_session(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
    async fn available_models(&self) -> Result<Vec<Model>, GatewayError>;
}

/// Shared HTTP client for all providers.
pub fn provider_client(timeout: Option<Duration>) -> Result<reqwest::Client, GatewayError> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        "SpectrumSage/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| GatewayError::ConnectionError(format!("Failed to create HTTP client: {}", e)))
}

/// Build every provider that has what it needs to run.
///
/// Key-based providers without a key are skipped with a warning. Ollama is
/// registered only when enabled.
pub fn build_providers(
    config: &FileProvidersConfig,
    client: reqwest::Client,
) -> Vec<Arc<dyn ProviderAdapter>> {
    let mut providers: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

    match config.gemini.resolve_api_key() {
        Some(key) => providers.push(Arc::new(gemini::provider(client.clone(), key, &config.gemini))),
        None => warn!(
            "Gemini provider disabled: set {} or providers.gemini.api_key",
            config.gemini.api_key_env
        ),
    }

    match config.openai.resolve_api_key() {
        Some(key) => providers.push(Arc::new(openai::provider(client.clone(), key, &config.openai))),
        None => debug!(
            "OpenAI provider disabled: {} not set",
            config.openai.api_key_env
        ),
    }

    match config.anthropic.resolve_api_key() {
        Some(key) => providers.push(Arc::new(anthropic::provider(
            client.clone(),
            key,
            &config.anthropic,
        ))),
        None => debug!(
            "Anthropic provider disabled: {} not set",
            config.anthropic.api_key_env
        ),
    }

    if config.ollama.enabled {
        providers.push(Arc::new(ollama::provider(client, &config.ollama)));
    }

    if providers.is_empty() {
        warn!("No LLM provider is configured");
    }
    providers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileGeminiConfig, FileOllamaConfig};

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("Gemini".parse::<ProviderKind>(), Ok(ProviderKind::Gemini));
        assert_eq!("google".parse::<ProviderKind>(), Ok(ProviderKind::Gemini));
        assert_eq!(" openai ".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert!("copilot".parse::<ProviderKind>().is_err());
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_infer() {
        assert_eq!(
            ProviderKind::infer(&Model::new("gemini-2.0-flash")),
            Some(ProviderKind::Gemini)
        );
        assert_eq!(
            ProviderKind::infer(&Model::new("claude-3-5-haiku-latest")),
            Some(ProviderKind::Anthropic)
        );
        assert_eq!(
            ProviderKind::infer(&Model::new("gpt-4o")),
            Some(ProviderKind::OpenAi)
        );
        assert_eq!(ProviderKind::infer(&Model::new("llama3.1")), None);
    }

    #[test]
    fn test_build_providers_skips_missing_keys() {
        let config = FileProvidersConfig {
            gemini: FileGeminiConfig {
                api_key: Some("g-key".into()),
                ..Default::default()
            },
            openai: crate::config::FileOpenAiConfig {
                api_key_env: "SAGE_TEST_UNSET_OPENAI".into(),
                ..Default::default()
            },
            anthropic: crate::config::FileAnthropicConfig {
                api_key_env: "SAGE_TEST_UNSET_ANTHROPIC".into(),
                ..Default::default()
            },
            ollama: FileOllamaConfig {
                enabled: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let client = provider_client(None).unwrap();
        let kinds: Vec<_> = build_providers(&config, client)
            .iter()
            .map(|p| p.kind())
            .collect();
        assert_eq!(kinds, vec![ProviderKind::Gemini, ProviderKind::Ollama]);
    }
}
