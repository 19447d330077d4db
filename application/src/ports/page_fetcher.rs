//! Page fetcher port
//!
//! Plain HTTP GET used by the article extraction use case. Status handling
//! is left to the caller so that a non-2xx reply counts as one proxy failure
//! rather than a transport error.

use async_trait::async_trait;
use thiserror::Error;

/// Transport-level fetch errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Timed out")]
    Timeout,

    #[error("Response too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// A fetched response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchedPage {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for fetching pages over HTTP.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
