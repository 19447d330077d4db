//! HTTP adapters

pub mod fetcher;

pub use fetcher::{DEFAULT_USER_AGENT, ReqwestPageFetcher};
