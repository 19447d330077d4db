//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Model used when nothing is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// An LLM model identifier (Value Object)
///
/// The identifier is passed through to the provider untouched. The family
/// checks only drive provider routing when no explicit route is configured.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model(String);

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is a Gemini model
    pub fn is_gemini(&self) -> bool {
        self.0.starts_with("gemini")
    }

    /// Check if this is an OpenAI GPT / o-series model
    pub fn is_gpt(&self) -> bool {
        self.0.starts_with("gpt-")
            || self.0.starts_with("chatgpt")
            || (self.0.starts_with('o') && self.0[1..].starts_with(|c: char| c.is_ascii_digit()))
    }

    /// Check if this is a Claude model
    pub fn is_claude(&self) -> bool {
        self.0.starts_with("claude")
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::new(DEFAULT_MODEL)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::new(s.trim()))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        let model: Model = "gpt-4o-mini".parse().unwrap();
        assert_eq!(model.to_string(), "gpt-4o-mini");
    }

    #[test]
    fn test_model_family_detection() {
        assert!(Model::new("gemini-2.0-flash").is_gemini());
        assert!(Model::new("gpt-4o").is_gpt());
        assert!(Model::new("o3-mini").is_gpt());
        assert!(Model::new("claude-sonnet-4-5").is_claude());
        assert!(!Model::new("llama3.2").is_gpt());
        assert!(!Model::new("ollama").is_gpt());
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default().as_str(), DEFAULT_MODEL);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Model::new("gpt-4o")).unwrap();
        assert_eq!(json, "\"gpt-4o\"");
        let model: Model = serde_json::from_str("\"claude-haiku-4-5\"").unwrap();
        assert!(model.is_claude());
    }
}
