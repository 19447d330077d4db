//! Fetch proxy endpoints.
//!
//! A proxy turns an article URL into a request URL and knows how to unwrap
//! the body it returns. Proxies are tried in list order by the extraction
//! use case; this module only describes them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder replaced by the raw target URL.
pub const URL_PLACEHOLDER: &str = "{url}";
/// Placeholder replaced by the percent-encoded target URL.
pub const URL_ENCODED_PLACEHOLDER: &str = "{url_encoded}";

/// Errors while unwrapping a proxy response body
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    #[error("Invalid JSON envelope: {0}")]
    InvalidEnvelope(String),

    #[error("Envelope field '{0}' is missing or not a string")]
    MissingField(String),
}

/// How a proxy returns the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProxyKind {
    /// JSON object whose `field` holds the page HTML.
    JsonEnvelope { field: String },
    /// The page HTML as the response body.
    Raw,
    /// No proxy: the target URL is fetched as-is.
    Direct,
}

/// A single fetch proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyEndpoint {
    pub name: String,
    /// Request URL template containing `{url}` or `{url_encoded}`.
    /// Ignored for [`ProxyKind::Direct`].
    #[serde(default)]
    pub template: String,
    #[serde(flatten)]
    pub kind: ProxyKind,
}

impl ProxyEndpoint {
    pub fn new(name: impl Into<String>, template: impl Into<String>, kind: ProxyKind) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            kind,
        }
    }

    /// A proxy-less endpoint that fetches the article URL directly.
    pub fn direct() -> Self {
        Self::new("direct", "", ProxyKind::Direct)
    }

    /// The two public proxies, in priority order.
    pub fn defaults() -> Vec<ProxyEndpoint> {
        vec![
            ProxyEndpoint::new(
                "allorigins",
                "https://api.allorigins.win/get?url={url_encoded}",
                ProxyKind::JsonEnvelope {
                    field: "contents".to_string(),
                },
            ),
            ProxyEndpoint::new(
                "thingproxy",
                "https://thingproxy.freeboard.io/fetch/{url}",
                ProxyKind::Raw,
            ),
        ]
    }

    /// Whether the template can carry the target URL.
    pub fn has_placeholder(&self) -> bool {
        matches!(self.kind, ProxyKind::Direct)
            || self.template.contains(URL_PLACEHOLDER)
            || self.template.contains(URL_ENCODED_PLACEHOLDER)
    }

    /// Build the request URL for `target`.
    pub fn request_url(&self, target: &str) -> String {
        if matches!(self.kind, ProxyKind::Direct) {
            return target.to_string();
        }
        self.template
            .replace(URL_ENCODED_PLACEHOLDER, &urlencoding::encode(target))
            .replace(URL_PLACEHOLDER, target)
    }

    /// Extract the page HTML from a proxy response body.
    pub fn unwrap_body(&self, body: &str) -> Result<String, ProxyError> {
        match &self.kind {
            ProxyKind::JsonEnvelope { field } => {
                let value: serde_json::Value = serde_json::from_str(body)
                    .map_err(|e| ProxyError::InvalidEnvelope(e.to_string()))?;
                value
                    .get(field)
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .ok_or_else(|| ProxyError::MissingField(field.clone()))
            }
            ProxyKind::Raw | ProxyKind::Direct => Ok(body.to_string()),
        }
    }
}
