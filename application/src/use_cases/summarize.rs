//! Summarize use case.
//!
//! The neutral summary flow: same content resolution as the analysis, a
//! shorter prompt, and a reply that is just the summary text.

use crate::config::BehaviorConfig;
use crate::ports::analysis_logger::{AnalysisEvent, AnalysisLogger, NoAnalysisLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{ProgressNotifier, Stage};
use crate::use_cases::analyze_article::AnalyzeInput;
use crate::use_cases::resolve_content::{ResolveContentUseCase, ResolveError};
use crate::use_cases::shared::send_structured;
use sage_domain::{ContentOrigin, Model, NeutralSummary, PromptTemplate, ReplyError, parse_neutral_summary};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizeError {
    #[error(transparent)]
    Content(#[from] ResolveError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Invalid summary reply: {0}")]
    Reply(#[from] ReplyError),
}

impl SummarizeError {
    pub fn user_message(&self) -> String {
        match self {
            SummarizeError::Content(e) => e.to_string(),
            SummarizeError::Gateway(GatewayError::Timeout) => {
                "The summary timed out. Please try again.".to_string()
            }
            SummarizeError::Gateway(e) => format!("Failed to summarize the article. {}", e),
            SummarizeError::Reply(e) => {
                format!("The summary returned an unexpected format. {}", e)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub summary: NeutralSummary,
    pub origin: ContentOrigin,
    pub model: Model,
}

pub struct SummarizeUseCase {
    gateway: Arc<dyn LlmGateway>,
    resolver: Arc<ResolveContentUseCase>,
    config: BehaviorConfig,
    logger: Arc<dyn AnalysisLogger>,
}

impl SummarizeUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, resolver: Arc<ResolveContentUseCase>) -> Self {
        Self {
            gateway,
            resolver,
            config: BehaviorConfig::default(),
            logger: Arc::new(NoAnalysisLogger),
        }
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn AnalysisLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub async fn execute(
        &self,
        input: AnalyzeInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<SummaryReport, SummarizeError> {
        let content = self.resolver.execute(input.article, progress).await?;
        let model = input.model;

        progress.on_stage_start(Stage::Summarize);
        let (text, _) = content.truncated(self.config.max_content_chars);
        info!("Requesting neutral summary from {}", model);

        let outcome = self.summarize(&text, &model).await;

        match outcome {
            Ok(summary) => {
                progress.on_stage_complete(Stage::Summarize);
                self.logger.log(AnalysisEvent::new(
                    "summary_completed",
                    json!({ "origin": content.origin(), "model": model.as_str() }),
                ));
                Ok(SummaryReport {
                    summary,
                    origin: content.origin().clone(),
                    model,
                })
            }
            Err(e) => {
                warn!("Summary failed: {}", e);
                progress.on_stage_failed(Stage::Summarize);
                self.logger.log(AnalysisEvent::new(
                    "summary_failed",
                    json!({ "error": e.to_string() }),
                ));
                Err(e)
            }
        }
    }

    async fn summarize(&self, text: &str, model: &Model) -> Result<NeutralSummary, SummarizeError> {
        let reply = send_structured(
            self.gateway.as_ref(),
            model,
            PromptTemplate::summary_system(),
            &PromptTemplate::summary_prompt(text),
            self.config.timeout,
        )
        .await?;
        Ok(parse_neutral_summary(&reply)?)
    }
}
