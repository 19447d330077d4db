//! Analyze Article use case.
//!
//! Resolves the submitted article, asks the model for a bias breakdown and
//! validates the reply against the analysis schema.

use crate::config::BehaviorConfig;
use crate::ports::analysis_logger::{AnalysisEvent, AnalysisLogger, NoAnalysisLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{ProgressNotifier, Stage};
use crate::use_cases::resolve_content::{ResolveContentUseCase, ResolveError};
use crate::use_cases::shared::send_structured;
use chrono::{DateTime, Utc};
use sage_domain::util::preview;
use sage_domain::{
    ArticleContent, ArticleInput, BiasAnalysis, ContentOrigin, Model, PromptTemplate, ReplyError,
    parse_bias_analysis,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while analysing an article
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error(transparent)]
    Content(#[from] ResolveError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Invalid analysis reply: {0}")]
    Reply(#[from] ReplyError),
}

impl AnalyzeError {
    /// The single message shown to the user.
    ///
    /// Content errors already carry user-facing text. Model failures are
    /// reported generically with the cause appended.
    pub fn user_message(&self) -> String {
        match self {
            AnalyzeError::Content(e) => e.to_string(),
            AnalyzeError::Gateway(GatewayError::Timeout) => {
                "The analysis timed out. Please try again.".to_string()
            }
            AnalyzeError::Gateway(e) => format!("Failed to analyze the article. {}", e),
            AnalyzeError::Reply(e) => {
                format!("The analysis returned an unexpected format. {}", e)
            }
        }
    }
}

/// Input for [`AnalyzeArticleUseCase`].
#[derive(Debug, Clone)]
pub struct AnalyzeInput {
    pub article: ArticleInput,
    pub model: Model,
}

impl AnalyzeInput {
    pub fn new(article: ArticleInput, model: Model) -> Self {
        Self { article, model }
    }
}

/// A validated analysis with where it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub analysis: BiasAnalysis,
    pub origin: ContentOrigin,
    pub model: Model,
    /// Characters of article text before truncation.
    pub content_chars: usize,
    /// Whether the prompt carried only a prefix of the article.
    pub truncated: bool,
    pub analyzed_at: DateTime<Utc>,
}

/// Use case for the bias analysis flow.
pub struct AnalyzeArticleUseCase {
    gateway: Arc<dyn LlmGateway>,
    resolver: Arc<ResolveContentUseCase>,
    config: BehaviorConfig,
    logger: Arc<dyn AnalysisLogger>,
}

impl AnalyzeArticleUseCase {
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
    ) -> Result<AnalysisReport, AnalyzeError> {
        let mode = input.article.mode();
        self.logger.log(AnalysisEvent::new(
            "analysis_requested",
            json!({
                "mode": mode.to_string(),
                "input": input.article.describe(),
                "model": input.model.as_str(),
            }),
        ));

        let result = self.run(input, progress).await;

        match &result {
            Ok(report) => self.logger.log(AnalysisEvent::new(
                "analysis_completed",
                json!({
                    "origin": &report.origin,
                    "model": report.model.as_str(),
                    "contentChars": report.content_chars,
                    "truncated": report.truncated,
                    "analysis": &report.analysis,
                }),
            )),
            Err(e) => self.logger.log(AnalysisEvent::new(
                "analysis_failed",
                json!({ "error": e.to_string() }),
            )),
        }
        result
    }

    async fn run(
        &self,
        input: AnalyzeInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<AnalysisReport, AnalyzeError> {
        let content = self.resolver.execute(input.article, progress).await?;

        progress.on_stage_start(Stage::Analyze);
        match self.analyze(&content, &input.model).await {
            Ok(report) => {
                progress.on_stage_complete(Stage::Analyze);
                Ok(report)
            }
            Err(e) => {
                warn!("Analysis failed: {}", e);
                progress.on_stage_failed(Stage::Analyze);
                Err(e)
            }
        }
    }

    async fn analyze(
        &self,
        content: &ArticleContent,
        model: &Model,
    ) -> Result<AnalysisReport, AnalyzeError> {
        let (text, truncated) = content.truncated(self.config.max_content_chars);
        if truncated {
            info!(
                "Article truncated from {} to {} chars",
                content.char_count(),
                self.config.max_content_chars
            );
        }

        info!("Requesting bias analysis from {}", model);
        let reply = send_structured(
            self.gateway.as_ref(),
            model,
            PromptTemplate::analysis_system(),
            &PromptTemplate::analysis_prompt(&text),
            self.config.timeout,
        )
        .await?;
        debug!("Analysis reply: {}", preview(&reply, 200));

        self.logger.log(AnalysisEvent::new(
            "llm_reply",
            json!({ "flow": "analysis", "model": model.as_str(), "bytes": reply.len() }),
        ));

        let analysis = parse_bias_analysis(&reply)?;

        Ok(AnalysisReport {
            analysis,
            origin: content.origin().clone(),
            model: model.clone(),
            content_chars: content.char_count(),
            truncated,
            analyzed_at: Utc::now(),
        })
    }
}
