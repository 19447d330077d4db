//! Main-content extraction from HTML

pub mod scraper_readability;

pub use scraper_readability::ScraperReadability;
