//! Plumbing shared by the HTTP chat providers.
//!
//! A provider only describes its wire format through [`ChatApi`];
//! [`HttpProvider`] and [`HttpSession`] handle sessions, status codes and
//! transport errors the same way for all of them.

use super::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use sage_application::ports::llm_gateway::{GatewayError, LlmSession};
use sage_domain::Model;
use sage_domain::util::preview;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// One prompt as a provider sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a Model,
    pub system: Option<&'a str>,
    pub prompt: &'a str,
    /// Ask for a single JSON object reply.
    pub json_output: bool,
}

/// Wire format of one chat API.
pub(crate) trait ChatApi: Send + Sync + 'static {
    fn kind(&self) -> ProviderKind;

    fn supports_model(&self, model: &Model) -> bool;

    /// Build the HTTP request, headers included.
    fn request(&self, client: &reqwest::Client, request: &ChatRequest<'_>) -> reqwest::RequestBuilder;

    /// Pull the reply text out of a successful response body.
    fn parse_reply(&self, body: &str) -> Result<String, GatewayError>;
}

/// Map a non-2xx response to a gateway error, keeping the provider's own
/// message when the body carries one.
pub(crate) fn status_error(status: u16, body: &str) -> GatewayError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| preview(body, 200));

    let message = format!("HTTP {}: {}", status, detail);
    match status {
        401 | 403 => GatewayError::Authentication(message),
        404 => GatewayError::ModelNotAvailable(message),
        408 | 504 => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(message),
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

pub(crate) fn invalid_response(context: &str, e: impl std::fmt::Display) -> GatewayError {
    GatewayError::InvalidResponse(format!("{}: {}", context, e))
}

pub(crate) struct HttpSession<A> {
    client: reqwest::Client,
    api: Arc<A>,
    model: Model,
    system: Option<String>,
    json_output: bool,
}

#[async_trait]
impl<A: ChatApi> LlmSession for HttpSession<A> {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: &self.model,
            system: self.system.as_deref(),
            prompt: content,
            json_output: self.json_output,
        };

        let start = Instant::now();
        let response = self
            .api
            .request(&self.client, &request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        debug!(
            provider = %self.api.kind(),
            model = %self.model,
            status,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Provider response"
        );

        if !(200..300).contains(&status) {
            return Err(status_error(status, &body));
        }
        self.api.parse_reply(&body)
    }
}

/// A [`ProviderAdapter`] over one [`ChatApi`].
pub(crate) struct HttpProvider<A> {
    client: reqwest::Client,
    api: Arc<A>,
    models: Vec<Model>,
}

impl<A: ChatApi> HttpProvider<A> {
    pub(crate) fn new(client: reqwest::Client, api: A, models: Vec<Model>) -> Self {
        Self {
            client,
            api: Arc::new(api),
            models,
        }
    }

    fn session(&self, model: &Model, system: Option<&str>, json_output: bool) -> Box<dyn LlmSession> {
        Box::new(HttpSession {
            client: self.client.clone(),
            api: Arc::clone(&self.api),
            model: model.clone(),
            system: system.map(str::to_string),
            json_output,
        })
    }
}

#[async_trait]
impl<A: ChatApi> ProviderAdapter for HttpProvider<A> {
    fn kind(&self) -> ProviderKind {
        self.api.kind()
    }

    fn supports_model(&self, model: &Model) -> bool {
        self.api.supports_model(model)
    }

    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(self.session(model, None, false))
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(self.session(model, Some(system_prompt), false))
    }

    async fn create_structured_session(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(self.session(model, Some(system_prompt), true))
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(self.models.clone())
    }
}

/// Turn a list of names into models.
pub(crate) fn models(names: &[&str]) -> Vec<Model> {
    names.iter().map(|n| Model::new(*n)).collect()
}
