//! reqwest-backed [`PageFetcher`].

use async_trait::async_trait;
use sage_application::ports::page_fetcher::{FetchError, FetchedPage, PageFetcher};
use std::time::{Duration, Instant};
use tracing::debug;

/// Maximum response body size (5 MB)
pub const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024;

/// Default per-request timeout for page fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_USER_AGENT: &str = concat!("SpectrumSage/", env!("CARGO_PKG_VERSION"));

/// Fetches pages with a shared `reqwest::Client`.
pub struct ReqwestPageFetcher {
    client: reqwest::Client,
    max_body: u64,
}

impl ReqwestPageFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            max_body: MAX_BODY_SIZE,
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_body() || e.is_decode() {
        FetchError::Body(e.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}

/// Rejects bodies over `max`, whether announced or actual.
fn check_size(size: Option<u64>, max: u64) -> Result<(), FetchError> {
    match size {
        Some(size) if size > max => Err(FetchError::TooLarge { size, max }),
        _ => Ok(()),
    }
}

#[async_trait]
impl PageFetcher for ReqwestPageFetcher {
    async fn get(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        check_size(response.content_length(), self.max_body)?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        check_size(Some(bytes.len() as u64), self.max_body)?;

        debug!(
            status,
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched {}",
            url
        );

        Ok(FetchedPage {
            status,
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
