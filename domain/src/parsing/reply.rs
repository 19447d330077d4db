//! Reply parsing for the analysis flows.
//!
//! These functions turn a free-form LLM reply into validated domain types.
//! They are pure domain logic with no I/O: just locating the JSON object and
//! checking it against the expected schema.
//!
//! | Function | Flow | Expected shape |
//! |----------|------|----------------|
//! | [`parse_bias_analysis`] | Bias analysis | seven-field object |
//! | [`parse_neutral_summary`] | Neutral summary | `{"summary": ...}` or plain text |

use crate::analysis::{BiasAnalysis, BiasLabel, Confidence, Factuality, NeutralSummary};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors while validating a model reply
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    #[error("The model reply did not contain a JSON object")]
    NoJson,

    #[error("The model reply was not valid JSON: {0}")]
    InvalidJson(String),

    #[error("The model reply is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("The model reply has an empty '{0}' field")]
    EmptyField(&'static str),

    #[error("The model reply has an invalid '{field}' value: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("The model reply has '{field}' out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

/// Locate the outermost JSON object in a reply.
///
/// Handles replies wrapped in markdown code fences or surrounded by prose.
/// Scans from the first `{` to its matching `}`, skipping braces inside
/// string literals. An unbalanced reply falls back to the last `}` so the
/// caller still sees the JSON error.
pub fn extract_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in reply[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&reply[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

fn parse_object(reply: &str) -> Result<Map<String, Value>, ReplyError> {
    let json = extract_json_object(reply).ok_or(ReplyError::NoJson)?;
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ReplyError::NoJson),
        Err(e) => Err(ReplyError::InvalidJson(e.to_string())),
    }
}

fn required_str<'a>(
    map: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ReplyError> {
    match map.get(field) {
        None | Some(Value::Null) => Err(ReplyError::MissingField(field)),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(ReplyError::EmptyField(field))
            } else {
                Ok(trimmed)
            }
        }
        Some(other) => Err(ReplyError::InvalidValue {
            field,
            value: other.to_string(),
        }),
    }
}

/// Accepts a number or a numeric string (optionally with a trailing `%`).
/// Fractions are rounded to the nearest integer.
fn parse_confidence(map: &Map<String, Value>) -> Result<Confidence, ReplyError> {
    const FIELD: &str = "confidenceBias";

    let raw = match map.get(FIELD) {
        None | Some(Value::Null) => return Err(ReplyError::MissingField(FIELD)),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    let display = map.get(FIELD).map(Value::to_string).unwrap_or_default();

    let value = raw
        .filter(|v| v.is_finite())
        .ok_or_else(|| ReplyError::InvalidValue {
            field: FIELD,
            value: display.clone(),
        })?;

    let rounded = value.round();
    if !(0.0..=f64::from(Confidence::MAX)).contains(&rounded) {
        return Err(ReplyError::OutOfRange {
            field: FIELD,
            value: display,
        });
    }

    Confidence::new(rounded as u32).map_err(|_| ReplyError::OutOfRange {
        field: FIELD,
        value: display,
    })
}

/// Parse and validate a bias analysis reply.
///
/// # Examples
///
/// ```
/// use sage_domain::parsing::parse_bias_analysis;
/// use sage_domain::analysis::BiasLabel;
///
/// let reply = r#"{"overallBias": "Center", "confidenceBias": 80, "factuality": "High",
///   "articleSummary": "s", "leftPerspective": "l", "centerPerspective": "c",
///   "rightPerspective": "r"}"#;
/// let analysis = parse_bias_analysis(reply).unwrap();
/// assert_eq!(analysis.overall_bias, BiasLabel::Center);
/// assert_eq!(analysis.confidence.percent(), 80);
/// ```
pub fn parse_bias_analysis(reply: &str) -> Result<BiasAnalysis, ReplyError> {
    let map = parse_object(reply)?;

    let bias_raw = required_str(&map, "overallBias")?;
    let overall_bias: BiasLabel = bias_raw.parse().map_err(|_| ReplyError::InvalidValue {
        field: "overallBias",
        value: bias_raw.to_string(),
    })?;

    let confidence = parse_confidence(&map)?;

    let factuality_raw = required_str(&map, "factuality")?;
    let factuality: Factuality =
        factuality_raw
            .parse()
            .map_err(|_| ReplyError::InvalidValue {
                field: "factuality",
                value: factuality_raw.to_string(),
            })?;

    Ok(BiasAnalysis {
        overall_bias,
        confidence,
        factuality,
        article_summary: required_str(&map, "articleSummary")?.to_string(),
        left_perspective: required_str(&map, "leftPerspective")?.to_string(),
        center_perspective: required_str(&map, "centerPerspective")?.to_string(),
        right_perspective: required_str(&map, "rightPerspective")?.to_string(),
    })
}

/// Parse a neutral summary reply.
///
/// Prefers `{"summary": ...}`; a reply without any JSON object is taken as
/// the summary text itself.
pub fn parse_neutral_summary(reply: &str) -> Result<NeutralSummary, ReplyError> {
    if extract_json_object(reply).is_none() {
        let text = reply.trim();
        if text.is_empty() {
            return Err(ReplyError::EmptyField("summary"));
        }
        return Ok(NeutralSummary::new(text));
    }

    let map = parse_object(reply)?;
    Ok(NeutralSummary::new(required_str(&map, "summary")?))
}
