use super::{ProviderAdapter, ProviderKind};
use crate::config::FileProvidersConfig;
use async_trait::async_trait;
use sage_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use sage_domain::Model;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// [`LlmGateway`] that forwards each session to the provider serving the model.
pub struct RoutingGateway {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    /// Model name → index into `providers`, from `[providers.routing]`.
    explicit_model_routing: HashMap<String, usize>,
    default_kind: ProviderKind,
}

impl RoutingGateway {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>, config: &FileProvidersConfig) -> Self {
        let mut explicit_model_routing = HashMap::new();

        for (model_name, provider_name) in &config.routing {
            let Ok(target_kind) = provider_name.parse::<ProviderKind>() else {
                warn!(
                    "Ignoring route {} -> {}: unknown provider",
                    model_name, provider_name
                );
                continue;
            };

            match providers.iter().position(|p| p.kind() == target_kind) {
                Some(idx) => {
                    explicit_model_routing.insert(model_name.clone(), idx);
                }
                None => warn!(
                    "Ignoring route {} -> {}: provider not configured",
                    model_name, target_kind
                ),
            }
        }

        Self {
            providers,
            explicit_model_routing,
            default_kind: config.default_kind(),
        }
    }

    pub fn providers(&self) -> impl Iterator<Item = ProviderKind> + '_ {
        self.providers.iter().map(|p| p.kind())
    }

    /// Routing priority:
    ///  1. `[providers.routing]` entry for the model name
    ///  2. the provider of the model's family (gemini / gpt / claude)
    ///  3. the configured default provider
    ///  4. the first registered provider
    ///  5. `GatewayError::ModelNotAvailable` when nothing is registered
    fn resolve_provider(&self, model: &Model) -> Result<&dyn ProviderAdapter, GatewayError> {
        if let Some(&idx) = self.explicit_model_routing.get(model.as_str()) {
            return Ok(self.providers[idx].as_ref());
        }

        if let Some(kind) = ProviderKind::infer(model)
            && let Some(p) = self.providers.iter().find(|p| p.kind() == kind)
        {
            return Ok(p.as_ref());
        }

        if let Some(p) = self
            .providers
            .iter()
            .find(|p| p.kind() == self.default_kind)
        {
            return Ok(p.as_ref());
        }

        self.providers
            .first()
            .map(|p| p.as_ref())
            .ok_or_else(|| {
                GatewayError::ModelNotAvailable(format!(
                    "No provider available for {}. Set an API key such as GEMINI_API_KEY.",
                    model
                ))
            })
    }

    fn route(&self, model: &Model) -> Result<&dyn ProviderAdapter, GatewayError> {
        let provider = self.resolve_provider(model)?;
        debug!("Routing {} to {}", model, provider.kind());
        Ok(provider)
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.route(model)?.create_session(model).await
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.route(model)?
            .create_session_with_system_prompt(model, system_prompt)
            .await
    }

    async fn create_structured_session(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.route(model)?
            .create_structured_session(model, system_prompt)
            .await
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        let mut all_models = Vec::new();
        for provider in &self.providers {
            match provider.available_models().await {
                Ok(models) => all_models.extend(models),
                Err(e) => warn!("Could not list {} models: {}", provider.kind(), e),
            }
        }
        Ok(all_models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Mock ProviderAdapter --------------------------------------------------

    struct MockProvider {
        kind: ProviderKind,
        models: Vec<Model>,
    }

    impl MockProvider {
        fn new(kind: ProviderKind) -> Arc<dyn ProviderAdapter> {
            Arc::new(Self {
                kind,
                models: vec![],
            })
        }

        fn with_models(kind: ProviderKind, models: &[&str]) -> Arc<dyn ProviderAdapter> {
            Arc::new(Self {
                kind,
                models: models.iter().map(|m| Model::new(*m)).collect(),
            })
        }
    }

    #[async_trait]
    impl ProviderAdapter for MockProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        fn supports_model(&self, _model: &Model) -> bool {
            true
        }

        async fn create_session(
            &self,
            _model: &Model,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Err(GatewayError::RequestFailed(format!("{:?}", self.kind)))
        }

        async fn create_session_with_system_prompt(
            &self,
            _model: &Model,
            _system_prompt: &str,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Err(GatewayError::RequestFailed(format!("{:?}", self.kind)))
        }

        async fn create_structured_session(
            &self,
            _model: &Model,
            _system_prompt: &str,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Err(GatewayError::RequestFailed(format!("structured {:?}", self.kind)))
        }

        async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
            Ok(self.models.clone())
        }
    }

    // -- Helpers ---------------------------------------------------------------

    fn default_config() -> FileProvidersConfig {
        FileProvidersConfig::default()
    }

    fn config_with_default(default: &str) -> FileProvidersConfig {
        FileProvidersConfig {
            default: Some(default.to_string()),
            ..Default::default()
        }
    }

    // -- resolve_provider routing priority tests -------------------------------

    #[test]
    fn explicit_routing_takes_highest_priority() {
        // gemini-2.0-flash would infer to Gemini; the explicit route wins
        let providers = vec![
            MockProvider::new(ProviderKind::Gemini),
            MockProvider::new(ProviderKind::Ollama),
        ];
        let mut config = default_config();
        config
            .routing
            .insert("gemini-2.0-flash".to_string(), "ollama".to_string());
        let gw = RoutingGateway::new(providers, &config);

        let provider = gw.resolve_provider(&Model::new("gemini-2.0-flash")).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Ollama);
    }

    #[test]
    fn claude_model_auto_infers_to_anthropic() {
        let providers = vec![
            MockProvider::new(ProviderKind::Gemini),
            MockProvider::new(ProviderKind::Anthropic),
        ];
        let gw = RoutingGateway::new(providers, &default_config());

        let provider = gw
            .resolve_provider(&Model::new("claude-3-5-sonnet-latest"))
            .unwrap();
        assert_eq!(provider.kind(), ProviderKind::Anthropic);
    }

    #[test]
    fn gpt_model_auto_infers_to_openai() {
        let providers = vec![
            MockProvider::new(ProviderKind::Gemini),
            MockProvider::new(ProviderKind::OpenAi),
        ];
        let gw = RoutingGateway::new(providers, &default_config());

        let provider = gw.resolve_provider(&Model::new("gpt-4o")).unwrap();
        assert_eq!(provider.kind(), ProviderKind::OpenAi);
    }

    #[test]
    fn falls_back_to_default_kind_when_no_family_match() {
        // llama3.1 has no family; the configured default (ollama) is used
        let providers = vec![
            MockProvider::new(ProviderKind::Gemini),
            MockProvider::new(ProviderKind::Ollama),
        ];
        let gw = RoutingGateway::new(providers, &config_with_default("ollama"));

        let provider = gw.resolve_provider(&Model::new("llama3.1")).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Ollama);
    }

    #[test]
    fn falls_back_to_first_provider_when_default_kind_unavailable() {
        let providers = vec![MockProvider::new(ProviderKind::OpenAi)];
        let gw = RoutingGateway::new(providers, &config_with_default("anthropic"));

        let provider = gw.resolve_provider(&Model::new("llama3.1")).unwrap();
        assert_eq!(provider.kind(), ProviderKind::OpenAi);
    }

    #[test]
    fn claude_falls_back_through_default_when_no_anthropic_provider() {
        // Claude -> Anthropic (absent) -> default Gemini (present)
        let providers = vec![
            MockProvider::new(ProviderKind::OpenAi),
            MockProvider::new(ProviderKind::Gemini),
        ];
        let gw = RoutingGateway::new(providers, &default_config());

        let provider = gw
            .resolve_provider(&Model::new("claude-3-5-haiku-latest"))
            .unwrap();
        assert_eq!(provider.kind(), ProviderKind::Gemini);
    }

    #[test]
    fn empty_providers_returns_model_not_available() {
        let gw = RoutingGateway::new(vec![], &default_config());

        let result = gw.resolve_provider(&Model::default());
        assert!(matches!(result, Err(GatewayError::ModelNotAvailable(_))));
    }

    #[test]
    fn unknown_or_unconfigured_routes_are_ignored() {
        let providers = vec![MockProvider::new(ProviderKind::Gemini)];
        let mut config = default_config();
        config
            .routing
            .insert("gpt-4o".to_string(), "nonexistent-provider".to_string());
        config
            .routing
            .insert("claude-3-5-haiku-latest".to_string(), "anthropic".to_string());
        let gw = RoutingGateway::new(providers, &config);

        assert!(gw.explicit_model_routing.is_empty());
    }

    // -- LlmGateway trait integration tests ------------------------------------

    #[tokio::test]
    async fn structured_sessions_reach_the_routed_provider() {
        let providers = vec![
            MockProvider::new(ProviderKind::Gemini),
            MockProvider::new(ProviderKind::OpenAi),
        ];
        let gw = RoutingGateway::new(providers, &default_config());

        let err = gw
            .create_structured_session(&Model::new("gpt-4o-mini"), "sys")
            .await
            .err()
            .unwrap();
        assert_eq!(err, GatewayError::RequestFailed("structured OpenAi".into()));
    }

    #[tokio::test]
    async fn available_models_aggregates_from_all_providers() {
        let providers = vec![
            MockProvider::with_models(ProviderKind::Gemini, &["gemini-2.0-flash", "gemini-1.5-pro"]),
            MockProvider::with_models(ProviderKind::Anthropic, &["claude-3-5-haiku-latest"]),
        ];
        let gw = RoutingGateway::new(providers, &default_config());

        let models = gw.available_models().await.unwrap();
        assert_eq!(models.len(), 3);
        assert!(models.contains(&Model::new("gemini-1.5-pro")));
        assert!(models.contains(&Model::new("claude-3-5-haiku-latest")));
        assert_eq!(
            gw.providers().collect::<Vec<_>>(),
            vec![ProviderKind::Gemini, ProviderKind::Anthropic]
        );
    }
}
