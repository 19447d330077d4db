//! Hand-written port doubles shared by the use case tests.

use crate::ports::analysis_logger::{AnalysisEvent, AnalysisLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use crate::ports::page_fetcher::{FetchError, FetchedPage, PageFetcher};
use crate::ports::pdf_text::{PdfError, PdfText, PdfTextPort};
use crate::ports::progress::{ProgressNotifier, Stage};
use crate::ports::readability::{ExtractedArticle, ReadabilityPort};
use async_trait::async_trait;
use sage_domain::Model;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

// ==================== Fetching ====================

/// Fetcher that answers from a URL → response table.
/// Unknown URLs fail with a request error.
pub(crate) struct ScriptedFetcher {
    responses: HashMap<String, Result<FetchedPage, FetchError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond(mut self, url: &str, response: Result<FetchedPage, FetchError>) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn get(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Request(format!("unscripted url {}", url))))
    }
}

/// Readability double: the HTML is the article text, unless it is
/// [`FakeReadability::NO_ARTICLE`].
pub(crate) struct FakeReadability;

impl FakeReadability {
    pub(crate) const NO_ARTICLE: &'static str = "<nav>menu only</nav>";
}

impl ReadabilityPort for FakeReadability {
    fn extract(&self, html: &str, _base_url: &str) -> Option<ExtractedArticle> {
        if html == Self::NO_ARTICLE {
            return None;
        }
        Some(ExtractedArticle {
            title: None,
            text_content: html.to_string(),
        })
    }
}

pub(crate) struct FakePdf {
    result: Result<PdfText, PdfError>,
}

impl FakePdf {
    pub(crate) fn pages(pages: &[&str]) -> Self {
        Self {
            result: Ok(PdfText::new(pages.iter().map(|p| p.to_string()).collect())),
        }
    }

    pub(crate) fn failing(error: PdfError) -> Self {
        Self { result: Err(error) }
    }
}

impl PdfTextPort for FakePdf {
    fn read_text(&self, _bytes: &[u8]) -> Result<PdfText, PdfError> {
        self.result.clone()
    }
}

// ==================== LLM ====================

/// What the mock gateway saw.
#[derive(Debug, Clone, Default)]
pub(crate) struct GatewayLog {
    pub system_prompts: Vec<String>,
    pub prompts: Vec<String>,
    pub structured: Vec<bool>,
    pub models: Vec<String>,
}

struct MockSession {
    model: Model,
    replies: Arc<Mutex<VecDeque<Result<String, GatewayError>>>>,
    log: Arc<Mutex<GatewayLog>>,
}

#[async_trait]
impl LlmSession for MockSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.log.lock().unwrap().prompts.push(content.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
    }
}

pub(crate) struct MockGateway {
    replies: Arc<Mutex<VecDeque<Result<String, GatewayError>>>>,
    log: Arc<Mutex<GatewayLog>>,
}

impl MockGateway {
    pub(crate) fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            log: Arc::new(Mutex::new(GatewayLog::default())),
        }
    }

    pub(crate) fn replying(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }

    pub(crate) fn log(&self) -> GatewayLog {
        self.log.lock().unwrap().clone()
    }

    fn session(&self, model: &Model, system_prompt: Option<&str>, structured: bool) -> Box<dyn LlmSession> {
        let mut log = self.log.lock().unwrap();
        log.models.push(model.to_string());
        log.structured.push(structured);
        if let Some(system) = system_prompt {
            log.system_prompts.push(system.to_string());
        }
        Box::new(MockSession {
            model: model.clone(),
            replies: Arc::clone(&self.replies),
            log: Arc::clone(&self.log),
        })
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(self.session(model, None, false))
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(self.session(model, Some(system_prompt), false))
    }

    async fn create_structured_session(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(self.session(model, Some(system_prompt), true))
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(vec![])
    }
}

/// Gateway whose session never answers.
pub(crate) struct HangingGateway;

struct HangingSession(Model);

#[async_trait]
impl LlmSession for HangingSession {
    fn model(&self) -> &Model {
        &self.0
    }

    async fn send(&self, _content: &str) -> Result<String, GatewayError> {
        std::future::pending::<Result<String, GatewayError>>().await
    }
}

#[async_trait]
impl LlmGateway for HangingGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(HangingSession(model.clone())))
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        _system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.create_session(model).await
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(vec![])
    }
}

// ==================== Observers ====================

#[derive(Default)]
pub(crate) struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_stage_start(&self, stage: Stage) {
        self.push(format!("start {:?}", stage));
    }

    fn on_stage_complete(&self, stage: Stage) {
        self.push(format!("complete {:?}", stage));
    }

    fn on_stage_failed(&self, stage: Stage) {
        self.push(format!("failed {:?}", stage));
    }

    fn on_proxy_attempt(&self, proxy: &str) {
        self.push(format!("attempt {}", proxy));
    }

    fn on_proxy_failed(&self, proxy: &str, reason: &str) {
        self.push(format!("failed {}: {}", proxy, reason));
    }
}

#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<(String, serde_json::Value)>>,
}

impl RecordingLogger {
    pub(crate) fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }
}

impl AnalysisLogger for RecordingLogger {
    fn log(&self, event: AnalysisEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type.to_string(), event.payload));
    }
}
