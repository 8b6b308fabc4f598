//! Club client port trait
//!
//! Defines the interface for reading the club's feed API.

use async_trait::async_trait;

use crate::domain::entities::{Article, FeedPage};
use crate::error::ClubError;

/// Read-only access to the club feed API
#[async_trait]
pub trait ClubClient: Send + Sync {
    /// Fetch one page of the "all new" feed. Page 0 is the default first page.
    async fn fetch_feed(&self, page: u32) -> Result<FeedPage, ClubError>;

    /// Fetch a single article by its reference (`{type}/{slug}.json`).
    ///
    /// Locked bodies are resolved with a second request for the raw markdown.
    async fn fetch_article(&self, reference: &str) -> Result<Article, ClubError>;
}
