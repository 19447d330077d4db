//! Value objects for the bias breakdown.

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A label string that matched none of the known values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} label: {value}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Lowercase, collapse spaces and underscores to hyphens.
fn normalize_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Overall political lean of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiasLabel {
    Left,
    CenterLeft,
    Center,
    CenterRight,
    Right,
}

impl BiasLabel {
    pub const ALL: [BiasLabel; 5] = [
        BiasLabel::Left,
        BiasLabel::CenterLeft,
        BiasLabel::Center,
        BiasLabel::CenterRight,
        BiasLabel::Right,
    ];

    /// Stable machine identifier (`center-left`).
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasLabel::Left => "left",
            BiasLabel::CenterLeft => "center-left",
            BiasLabel::Center => "center",
            BiasLabel::CenterRight => "center-right",
            BiasLabel::Right => "right",
        }
    }

    /// Human-readable form (`Center-Left`).
    pub fn display_name(&self) -> &'static str {
        match self {
            BiasLabel::Left => "Left",
            BiasLabel::CenterLeft => "Center-Left",
            BiasLabel::Center => "Center",
            BiasLabel::CenterRight => "Center-Right",
            BiasLabel::Right => "Right",
        }
    }

    /// Signed position on the spectrum, `-2` (left) to `2` (right).
    pub fn lean(&self) -> i8 {
        match self {
            BiasLabel::Left => -2,
            BiasLabel::CenterLeft => -1,
            BiasLabel::Center => 0,
            BiasLabel::CenterRight => 1,
            BiasLabel::Right => 2,
        }
    }
}

impl std::fmt::Display for BiasLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for BiasLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "left" | "esquerda" => Ok(BiasLabel::Left),
            "center-left" | "centre-left" | "lean-left" | "left-center" | "centro-esquerda" => {
                Ok(BiasLabel::CenterLeft)
            }
            "center" | "centre" | "centro" => Ok(BiasLabel::Center),
            "center-right" | "centre-right" | "lean-right" | "right-center" | "centro-direita" => {
                Ok(BiasLabel::CenterRight)
            }
            "right" | "direita" => Ok(BiasLabel::Right),
            _ => Err(UnknownLabel {
                kind: "bias",
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for BiasLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BiasLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How factual the article's reporting is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factuality {
    VeryHigh,
    High,
    Mixed,
    Low,
    VeryLow,
}

impl Factuality {
    pub const ALL: [Factuality; 5] = [
        Factuality::VeryHigh,
        Factuality::High,
        Factuality::Mixed,
        Factuality::Low,
        Factuality::VeryLow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Factuality::VeryHigh => "very-high",
            Factuality::High => "high",
            Factuality::Mixed => "mixed",
            Factuality::Low => "low",
            Factuality::VeryLow => "very-low",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Factuality::VeryHigh => "Very High",
            Factuality::High => "High",
            Factuality::Mixed => "Mixed",
            Factuality::Low => "Low",
            Factuality::VeryLow => "Very Low",
        }
    }
}

impl std::fmt::Display for Factuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Factuality {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "very-high" | "muito-alta" => Ok(Factuality::VeryHigh),
            "high" | "alta" => Ok(Factuality::High),
            "mixed" | "mista" => Ok(Factuality::Mixed),
            "low" | "baixa" => Ok(Factuality::Low),
            "very-low" | "muito-baixa" => Ok(Factuality::VeryLow),
            _ => Err(UnknownLabel {
                kind: "factuality",
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for Factuality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Factuality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Confidence in the bias classification, 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Confidence(u8);

impl Confidence {
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value > Self::MAX {
            return Err(DomainError::InvalidConfidence(value));
        }
        Ok(Self(value as u8))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Confidence {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Confidence::new(value)
    }
}

impl From<Confidence> for u32 {
    fn from(value: Confidence) -> Self {
        u32::from(value.0)
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_label_parses_english_and_portuguese() {
        assert_eq!("Center-Left".parse::<BiasLabel>().unwrap(), BiasLabel::CenterLeft);
        assert_eq!("center left".parse::<BiasLabel>().unwrap(), BiasLabel::CenterLeft);
        assert_eq!("Centro-Direita".parse::<BiasLabel>().unwrap(), BiasLabel::CenterRight);
        assert_eq!("Esquerda".parse::<BiasLabel>().unwrap(), BiasLabel::Left);
        assert_eq!("CENTRO".parse::<BiasLabel>().unwrap(), BiasLabel::Center);
        assert!("far-left".parse::<BiasLabel>().is_err());
    }

    #[test]
    fn test_bias_label_serializes_kebab_case() {
        let json = serde_json::to_string(&BiasLabel::CenterRight).unwrap();
        assert_eq!(json, "\"center-right\"");
        for label in BiasLabel::ALL {
            assert_eq!(label.as_str().parse::<BiasLabel>().unwrap(), label);
            assert_eq!(label.display_name().parse::<BiasLabel>().unwrap(), label);
        }
    }

    #[test]
    fn test_lean_is_ordered() {
        let leans: Vec<i8> = BiasLabel::ALL.iter().map(|l| l.lean()).collect();
        assert_eq!(leans, vec![-2, -1, 0, 1, 2]);
    }

    #[test]
    fn test_factuality_parses() {
        assert_eq!("Very High".parse::<Factuality>().unwrap(), Factuality::VeryHigh);
        assert_eq!("muito baixa".parse::<Factuality>().unwrap(), Factuality::VeryLow);
        assert_eq!("Mista".parse::<Factuality>().unwrap(), Factuality::Mixed);
        assert!("unknown".parse::<Factuality>().is_err());
    }

    #[test]
    fn test_confidence_range() {
        assert_eq!(Confidence::new(0).unwrap().percent(), 0);
        assert_eq!(Confidence::new(100).unwrap().percent(), 100);
        assert_eq!(
            Confidence::new(101).unwrap_err(),
            DomainError::InvalidConfidence(101)
        );
    }

    #[test]
    fn test_confidence_serde_validates() {
        let c: Confidence = serde_json::from_str("85").unwrap();
        assert_eq!(c.to_string(), "85%");
        assert!(serde_json::from_str::<Confidence>("150").is_err());
        assert_eq!(serde_json::to_string(&c).unwrap(), "85");
    }
}
