//! Ollama native chat API (`/api/chat`).

use super::ProviderKind;
use super::http::{ChatApi, ChatRequest, HttpProvider, invalid_response};
use crate::config::FileOllamaConfig;
use sage_application::ports::llm_gateway::GatewayError;
use sage_domain::Model;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

pub(crate) struct OllamaApi {
    endpoint: String,
}

impl OllamaApi {
    pub fn new(config: &FileOllamaConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self) -> String {
        format!("{}/api/chat", self.endpoint)
    }

    fn body(&self, request: &ChatRequest<'_>) -> Value {
        let mut messages = Vec::new();
        if let Some(system) = request.system {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": request.prompt}));

        let mut body = json!({
            "model": request.model.as_str(),
            "messages": messages,
            "stream": false,
        });
        if request.json_output {
            body["format"] = json!("json");
        }
        body
    }
}

impl ChatApi for OllamaApi {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    /// Local models have arbitrary names.
    fn supports_model(&self, _model: &Model) -> bool {
        true
    }

    fn request(&self, client: &reqwest::Client, request: &ChatRequest<'_>) -> reqwest::RequestBuilder {
        client.post(self.url()).json(&self.body(request))
    }

    fn parse_reply(&self, body: &str) -> Result<String, GatewayError> {
        let response: ChatResponse =
            serde_json::from_str(body).map_err(|e| invalid_response("Ollama response", e))?;
        response
            .message
            .map(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| GatewayError::InvalidResponse("Ollama returned an empty reply".into()))
    }
}

pub(crate) fn provider(client: reqwest::Client, config: &FileOllamaConfig) -> HttpProvider<OllamaApi> {
    let models = config.models.iter().map(|m| Model::new(m.as_str())).collect();
    HttpProvider::new(client, OllamaApi::new(config), models)
}
