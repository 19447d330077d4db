//! Parsing of LLM replies into validated domain types.

pub mod reply;

pub use reply::{
    ReplyError, extract_json_object, parse_bias_analysis, parse_neutral_summary,
};
