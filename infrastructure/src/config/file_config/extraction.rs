//! Extraction configuration from TOML (`[extraction]` section)
//!
//! ```toml
//! [extraction]
//! timeout_seconds = 20
//!
//! [[extraction.proxies]]
//! name = "allorigins"
//! template = "https://api.allorigins.win/get?url={url_encoded}"
//! kind = "json_envelope"
//! field = "contents"
//!
//! [[extraction.proxies]]
//! name = "direct"
//! kind = "direct"
//! ```

use super::issue::{ConfigIssue, ConfigIssueCode};
use sage_domain::{ProxyEndpoint, ProxyKind};
use serde::{Deserialize, Serialize};

/// One `[[extraction.proxies]]` entry, kept as raw strings so that a typo
/// is reported instead of failing the whole config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProxyConfig {
    pub name: String,
    #[serde(default)]
    pub template: String,
    /// `json_envelope`, `raw` or `direct`.
    pub kind: String,
    /// Envelope field holding the HTML (`json_envelope` only).
    #[serde(default)]
    pub field: Option<String>,
}

impl FileProxyConfig {
    pub fn to_endpoint(&self) -> Result<ProxyEndpoint, ConfigIssue> {
        let kind = match self.kind.trim().to_lowercase().as_str() {
            "json_envelope" | "json" => match self.field.as_deref().map(str::trim) {
                Some(field) if !field.is_empty() => ProxyKind::JsonEnvelope {
                    field: field.to_string(),
                },
                _ => {
                    return Err(ConfigIssue::warning(
                        ConfigIssueCode::MissingEnvelopeField {
                            name: self.name.clone(),
                        },
                        format!(
                            "extraction.proxies '{}': json_envelope proxy needs a 'field', skipping",
                            self.name
                        ),
                    ));
                }
            },
            "raw" => ProxyKind::Raw,
            "direct" => ProxyKind::Direct,
            other => {
                return Err(ConfigIssue::warning(
                    ConfigIssueCode::UnknownProxyKind {
                        name: self.name.clone(),
                        kind: other.to_string(),
                    },
                    format!(
                        "extraction.proxies '{}': unknown kind '{}' (expected json_envelope, raw or direct), skipping",
                        self.name, other
                    ),
                ));
            }
        };

        let endpoint = ProxyEndpoint::new(self.name.clone(), self.template.clone(), kind);
        if !endpoint.has_placeholder() {
            return Err(ConfigIssue::warning(
                ConfigIssueCode::MissingPlaceholder {
                    name: self.name.clone(),
                },
                format!(
                    "extraction.proxies '{}': template has no {{url}} or {{url_encoded}} placeholder, skipping",
                    self.name
                ),
            ));
        }
        Ok(endpoint)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExtractionConfig {
    /// Proxies in priority order. Empty means the built-in pair.
    pub proxies: Vec<FileProxyConfig>,
    /// Per-request timeout for page fetches.
    pub timeout_seconds: u64,
    /// User-Agent header for page fetches.
    pub user_agent: Option<String>,
}

impl Default for FileExtractionConfig {
    fn default() -> Self {
        Self {
            proxies: Vec::new(),
            timeout_seconds: 30,
            user_agent: None,
        }
    }
}

impl FileExtractionConfig {
    /// The usable proxies and the issues for entries that were skipped.
    pub fn endpoints(&self) -> (Vec<ProxyEndpoint>, Vec<ConfigIssue>) {
        if self.proxies.is_empty() {
            return (ProxyEndpoint::defaults(), Vec::new());
        }

        let mut endpoints = Vec::new();
        let mut issues = Vec::new();
        for proxy in &self.proxies {
            match proxy.to_endpoint() {
                Ok(endpoint) => endpoints.push(endpoint),
                Err(issue) => issues.push(issue),
            }
        }
        (endpoints, issues)
    }
}
