//! Content sources for the home feed and the article reader.
//!
//! # Architecture
//!
//! ```text
//! SanitySource ─┐
//!               ├─ AppContext (remote first, fallback on failure) → render → UI
//! FallbackSource┘
//! ```
//!
//! Image assets are resolved to display URLs by an [`AssetResolver`]; for
//! the hosted content API that is the [`ImageUrlBuilder`].

mod config;
mod fallback;
mod image;
mod sanity;

pub use config::ContentConfig;
pub use fallback::FallbackSource;
pub use image::ImageUrlBuilder;
pub use sanity::SanitySource;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Article, ArticleSummary, AssetRef, Category};

/// Supplies articles to the application.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Home feed, newest first.
    async fn list_articles(&self) -> Result<Vec<ArticleSummary>>;

    /// Look up one article by slug or id. `Ok(None)` when it does not exist.
    async fn get_article(&self, id: &str) -> Result<Option<Article>>;

    async fn list_categories(&self) -> Result<Vec<Category>>;
}

/// Turns an asset reference into a display URL at the requested width.
///
/// Implementations must be pure: no network access, no shared state.
pub trait AssetResolver: Send + Sync {
    fn resolve(&self, asset: &AssetRef, width: u32) -> Option<String>;
}
