//! Google Gemini `generateContent` API.

use super::ProviderKind;
use super::http::{ChatApi, ChatRequest, HttpProvider, invalid_response, models};
use crate::config::FileGeminiConfig;
use sage_application::ports::llm_gateway::GatewayError;
use sage_domain::Model;
use serde::{Deserialize, Serialize};

const KNOWN_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
    "gemini-1.5-pro",
    "gemini-1.5-flash",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

pub(crate) struct GeminiApi {
    api_key: String,
    base_url: String,
    max_output_tokens: Option<u32>,
}

impl GeminiApi {
    pub fn new(api_key: String, config: &FileGeminiConfig) -> Self {
        Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_output_tokens: config.max_output_tokens,
        }
    }

    fn endpoint(&self, model: &Model) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            model.as_str()
        )
    }

    fn body<'a>(&self, request: &ChatRequest<'a>) -> GeminiRequest<'a> {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: vec![GeminiPart {
                    text: request.prompt,
                }],
            }],
            system_instruction: request.system.map(|text| GeminiContent {
                role: None,
                parts: vec![GeminiPart { text }],
            }),
            generation_config: GeminiGenerationConfig {
                response_mime_type: request.json_output.then_some("application/json"),
                max_output_tokens: self.max_output_tokens,
            },
        }
    }
}

impl ChatApi for GeminiApi {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn supports_model(&self, model: &Model) -> bool {
        model.is_gemini()
    }

    fn request(&self, client: &reqwest::Client, request: &ChatRequest<'_>) -> reqwest::RequestBuilder {
        client
            .post(self.endpoint(request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&self.body(request))
    }

    fn parse_reply(&self, body: &str) -> Result<String, GatewayError> {
        let response: GeminiResponse =
            serde_json::from_str(body).map_err(|e| invalid_response("Gemini response", e))?;

        if let Some(reason) = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
        {
            return Err(GatewayError::InvalidResponse(format!(
                "Gemini blocked the prompt: {}",
                reason
            )));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::InvalidResponse("Gemini returned no candidates".into()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GatewayError::InvalidResponse(format!(
                "Gemini returned an empty reply (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}

pub(crate) fn provider(
    client: reqwest::Client,
    api_key: String,
    config: &FileGeminiConfig,
) -> HttpProvider<GeminiApi> {
    HttpProvider::new(client, GeminiApi::new(api_key, config), models(KNOWN_MODELS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api() -> GeminiApi {
        GeminiApi::new(
            "key".into(),
            &FileGeminiConfig {
                base_url: "https://gemini.test/".into(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            api().endpoint(&Model::new("gemini-2.0-flash")),
            "https://gemini.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_structured_body() {
        let model = Model::default();
        let request = ChatRequest {
            model: &model,
            system: Some("be neutral"),
            prompt: "analyze this",
            json_output: true,
        };
        let body = serde_json::to_value(api().body(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "analyze this"}]}],
                "systemInstruction": {"parts": [{"text": "be neutral"}]},
                "generationConfig": {"responseMimeType": "application/json"}
            })
        );
    }

    #[test]
    fn test_plain_body_omits_optional_parts() {
        let model = Model::default();
        let request = ChatRequest {
            model: &model,
            system: None,
            prompt: "hi",
            json_output: false,
        };
        let body = serde_json::to_value(api().body(&request)).unwrap();
        assert!(body.get("systemInstruction").is_none());
        assert_eq!(body["generationConfig"], json!({}));
    }

    #[test]
    fn test_parse_reply_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"summary\":"}, {"text": " \"ok\"}"}], "role": "model"},
                "finishReason": "STOP"
            }]
        })
        .to_string();
        assert_eq!(api().parse_reply(&body).unwrap(), "{\"summary\": \"ok\"}");
    }

    #[test]
    fn test_parse_reply_blocked() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string();
        let err = api().parse_reply(&body).unwrap_err();
        assert_eq!(
            err,
            GatewayError::InvalidResponse("Gemini blocked the prompt: SAFETY".into())
        );
    }

    #[test]
    fn test_parse_reply_empty_candidate() {
        let body = json!({"candidates": [{"finishReason": "MAX_TOKENS"}]}).to_string();
        assert!(matches!(
            api().parse_reply(&body),
            Err(GatewayError::InvalidResponse(msg)) if msg.contains("MAX_TOKENS")
        ));
    }

    #[test]
    fn test_supports_only_gemini_models() {
        assert!(api().supports_model(&Model::new("gemini-1.5-pro")));
        assert!(!api().supports_model(&Model::new("gpt-4o")));
    }
}
