//! Prompt templates for the analysis flows

use crate::analysis::{BiasLabel, Factuality};

/// Templates for generating prompts for each flow
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the bias analysis flow
    pub fn analysis_system() -> &'static str {
        r#"You are an advanced news analyst in the style of Ground News.
Your task is to break down how a news text is presented, in a neutral and multi-faceted way.
You never take sides. You describe framing, emphasis and word choice, not whether a position is right.
You always reply with a single JSON object and nothing else."#
    }

    /// User prompt for the bias analysis flow
    pub fn analysis_prompt(article: &str) -> String {
        let bias_values = Self::quoted_list(BiasLabel::ALL.iter().map(|b| b.display_name()));
        let factuality_values =
            Self::quoted_list(Factuality::ALL.iter().map(|f| f.display_name()));

        format!(
            r#"Analyze the following text:
---
{article}
---

Based on the text, reply strictly with the following JSON object. Do not include markdown or any text outside the JSON object:

{{
  "overallBias": "<Classify the overall bias of the article as one of {bias_values}>",
  "confidenceBias": <An integer from 0 to 100 representing your confidence in the bias classification>,
  "factuality": "<Rate the level of factuality as one of {factuality_values}>",
  "articleSummary": "<A short, strictly neutral summary of the article's main points>",
  "leftPerspective": "<How a left-leaning outlet would typically cover this topic, highlighting the angles and language it would use>",
  "centerPerspective": "<How a centrist outlet would typically cover this topic, focusing on a balanced presentation>",
  "rightPerspective": "<How a right-leaning outlet would typically cover this topic, highlighting its preferred angles and framing>"
}}"#
        )
    }

    /// System prompt for the neutral summary flow
    pub fn summary_system() -> &'static str {
        r#"You are an expert news summarizer.
Your goal is to provide a short, neutral summary of the given text.
Do not editorialize, speculate, or add information that is not in the text."#
    }

    /// User prompt for the neutral summary flow
    pub fn summary_prompt(text: &str) -> String {
        format!(
            r#"Text:
---
{text}
---

Reply with a JSON object of the form {{"summary": "<a concise, neutral summary>"}} and nothing else."#
        )
    }

    fn quoted_list<'a>(values: impl Iterator<Item = &'a str>) -> String {
        let quoted: Vec<String> = values.map(|v| format!("'{}'", v)).collect();
        match quoted.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }
}
