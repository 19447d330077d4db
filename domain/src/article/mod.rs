//! Article input and validated article content.
//!
//! - [`entities::ArticleInput`] — what the user submitted (link, text or PDF)
//! - [`content::ArticleContent`] — text that passed the minimum-length check

pub mod content;
pub mod entities;
