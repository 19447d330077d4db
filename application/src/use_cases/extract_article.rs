//! Extract Article use case.
//!
//! Gets the main text of an article page by trying each fetch proxy in
//! priority order. Any failure on one proxy falls through to the next; when
//! every proxy has failed the request fails with a single terminal error.
//! There is no retry or backoff.

use crate::ports::analysis_logger::{AnalysisEvent, AnalysisLogger, NoAnalysisLogger};
use crate::ports::page_fetcher::{FetchError, PageFetcher};
use crate::ports::progress::ProgressNotifier;
use crate::ports::readability::ReadabilityPort;
use sage_domain::{ProxyEndpoint, ProxyError};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single proxy attempt failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Status: {0}")]
    Status(u16),

    #[error(transparent)]
    Envelope(#[from] ProxyError),

    #[error("Empty HTML content.")]
    EmptyBody,

    #[error("Failed to extract main text content from the article.")]
    NoArticle,
}

/// One failed proxy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyFailure {
    pub proxy: String,
    pub error: AttemptError,
}

/// Errors from article extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Failed to process the link. All proxy services failed.")]
    AllProxiesFailed { attempts: Vec<ProxyFailure> },
}

/// Text extracted from an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub title: Option<String>,
    /// Name of the proxy that succeeded.
    pub proxy: String,
}

/// Use case for extracting article text from a URL.
pub struct ExtractArticleUseCase {
    fetcher: Arc<dyn PageFetcher>,
    readability: Arc<dyn ReadabilityPort>,
    proxies: Vec<ProxyEndpoint>,
    logger: Arc<dyn AnalysisLogger>,
}

impl ExtractArticleUseCase {
    /// Create with the default proxy list.
    pub fn new(fetcher: Arc<dyn PageFetcher>, readability: Arc<dyn ReadabilityPort>) -> Self {
        Self {
            fetcher,
            readability,
            proxies: ProxyEndpoint::defaults(),
            logger: Arc::new(NoAnalysisLogger),
        }
    }

    /// Replace the proxy list (tried in the given order).
    pub fn with_proxies(mut self, proxies: Vec<ProxyEndpoint>) -> Self {
        self.proxies = proxies;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn AnalysisLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn proxies(&self) -> &[ProxyEndpoint] {
        &self.proxies
    }

    /// Extract the article at `url`.
    pub async fn execute(
        &self,
        url: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<ExtractedText, ExtractError> {
        let mut attempts = Vec::new();

        for proxy in &self.proxies {
            info!(proxy = %proxy.name, "Attempting proxy for {}", url);
            progress.on_proxy_attempt(&proxy.name);

            match self.try_proxy(proxy, url).await {
                Ok(extracted) => {
                    info!(
                        proxy = %proxy.name,
                        chars = extracted.text.chars().count(),
                        "Article text extracted"
                    );
                    self.logger.log(AnalysisEvent::new(
                        "extraction_succeeded",
                        json!({
                            "url": url,
                            "proxy": proxy.name,
                            "chars": extracted.text.chars().count(),
                        }),
                    ));
                    return Ok(extracted);
                }
                Err(error) => {
                    warn!(proxy = %proxy.name, "Proxy failed: {}", error);
                    progress.on_proxy_failed(&proxy.name, &error.to_string());
                    self.logger.log(AnalysisEvent::new(
                        "proxy_failed",
                        json!({
                            "url": url,
                            "proxy": proxy.name,
                            "error": error.to_string(),
                        }),
                    ));
                    attempts.push(ProxyFailure {
                        proxy: proxy.name.clone(),
                        error,
                    });
                }
            }
        }

        warn!("All {} proxies failed for {}", attempts.len(), url);
        Err(ExtractError::AllProxiesFailed { attempts })
    }

    async fn try_proxy(&self, proxy: &ProxyEndpoint, url: &str) -> Result<ExtractedText, AttemptError> {
        let request_url = proxy.request_url(url);
        debug!("GET {}", request_url);

        let page = self.fetcher.get(&request_url).await?;
        if !page.is_success() {
            return Err(AttemptError::Status(page.status));
        }

        let html = proxy.unwrap_body(&page.body)?;
        if html.trim().is_empty() {
            return Err(AttemptError::EmptyBody);
        }

        let article = self
            .readability
            .extract(&html, url)
            .filter(|a| !a.text_content.trim().is_empty())
            .ok_or(AttemptError::NoArticle)?;

        Ok(ExtractedText {
            text: article.text_content,
            title: article.title,
            proxy: proxy.name.clone(),
        })
    }
}
