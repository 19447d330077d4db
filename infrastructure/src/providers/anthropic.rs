//! Anthropic Messages API.

use super::ProviderKind;
use super::http::{ChatApi, ChatRequest, HttpProvider, invalid_response, models};
use crate::config::FileAnthropicConfig;
use sage_application::ports::llm_gateway::GatewayError;
use sage_domain::Model;
use serde::Deserialize;
use serde_json::{Value, json};

const KNOWN_MODELS: &[&str] = &[
    "claude-3-5-sonnet-latest",
    "claude-3-5-haiku-latest",
    "claude-sonnet-4-0",
];

/// Appended to the system prompt of structured sessions; the Messages API
/// has no JSON response mode.
const JSON_ONLY: &str = "Respond with a single JSON object only.";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

pub(crate) struct AnthropicApi {
    api_key: String,
    base_url: String,
    max_tokens: u32,
    api_version: String,
}

impl AnthropicApi {
    pub fn new(api_key: String, config: &FileAnthropicConfig) -> Self {
        Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
            api_version: config.api_version.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    fn body(&self, request: &ChatRequest<'_>) -> Value {
        let system = match (request.system, request.json_output) {
            (Some(system), true) => Some(format!("{}\n{}", system, JSON_ONLY)),
            (Some(system), false) => Some(system.to_string()),
            (None, true) => Some(JSON_ONLY.to_string()),
            (None, false) => None,
        };

        let mut body = json!({
            "model": request.model.as_str(),
            "max_tokens": self.max_tokens,
            "messages": [{"role": "user", "content": request.prompt}],
        });
        if let Some(system) = system {
            body["system"] = json!(system);
        }
        body
    }
}

impl ChatApi for AnthropicApi {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn supports_model(&self, model: &Model) -> bool {
        model.is_claude()
    }

    fn request(&self, client: &reqwest::Client, request: &ChatRequest<'_>) -> reqwest::RequestBuilder {
        client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&self.body(request))
    }

    fn parse_reply(&self, body: &str) -> Result<String, GatewayError> {
        let response: MessagesResponse =
            serde_json::from_str(body).map_err(|e| invalid_response("Anthropic response", e))?;

        let text: String = response
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect();

        if text.trim().is_empty() {
            return Err(GatewayError::InvalidResponse(format!(
                "Anthropic returned an empty reply (stop reason: {})",
                response.stop_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}

pub(crate) fn provider(
    client: reqwest::Client,
    api_key: String,
    config: &FileAnthropicConfig,
) -> HttpProvider<AnthropicApi> {
    HttpProvider::new(client, AnthropicApi::new(api_key, config), models(KNOWN_MODELS))
}
