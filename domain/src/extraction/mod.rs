//! Fetch proxy definitions for URL article extraction.

pub mod proxy;

pub use proxy::{ProxyEndpoint, ProxyError, ProxyKind};
