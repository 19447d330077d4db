//! OpenAI Chat Completions API (and compatible endpoints).

use super::ProviderKind;
use super::http::{ChatApi, ChatRequest, HttpProvider, invalid_response, models};
use crate::config::FileOpenAiConfig;
use sage_application::ports::llm_gateway::GatewayError;
use sage_domain::Model;
use serde::Deserialize;
use serde_json::{Value, json};

const KNOWN_MODELS: &[&str] = &["gpt-4o", "gpt-4o-mini", "gpt-4.1", "gpt-4.1-mini"];

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    refusal: Option<String>,
}

pub(crate) struct OpenAiApi {
    api_key: String,
    base_url: String,
    max_tokens: Option<u32>,
}

impl OpenAiApi {
    pub fn new(api_key: String, config: &FileOpenAiConfig) -> Self {
        Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
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
        });
        if request.json_output {
            body["response_format"] = json!({"type": "json_object"});
        }
        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }
}

impl ChatApi for OpenAiApi {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn supports_model(&self, model: &Model) -> bool {
        model.is_gpt()
    }

    fn request(&self, client: &reqwest::Client, request: &ChatRequest<'_>) -> reqwest::RequestBuilder {
        client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.body(request))
    }

    fn parse_reply(&self, body: &str) -> Result<String, GatewayError> {
        let completion: ChatCompletion =
            serde_json::from_str(body).map_err(|e| invalid_response("OpenAI response", e))?;
        let message = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| GatewayError::InvalidResponse("OpenAI returned no choices".into()))?;

        if let Some(refusal) = message.refusal {
            return Err(GatewayError::InvalidResponse(format!(
                "Model refused: {}",
                refusal
            )));
        }
        message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| GatewayError::InvalidResponse("OpenAI returned an empty reply".into()))
    }
}

pub(crate) fn provider(
    client: reqwest::Client,
    api_key: String,
    config: &FileOpenAiConfig,
) -> HttpProvider<OpenAiApi> {
    HttpProvider::new(client, OpenAiApi::new(api_key, config), models(KNOWN_MODELS))
}
