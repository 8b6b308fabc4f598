//! Mock implementations of port traits
//!
//! In-memory club client that serves canned pages and articles and records
//! how it was called.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::{Article, FeedPage};
use crate::domain::ports::ClubClient;
use crate::error::ClubError;

type ErrorFactory = Box<dyn Fn() -> ClubError + Send + Sync>;

// ============================================================================
// In-Memory Club Client
// ============================================================================

#[derive(Default)]
pub struct MockClubClient {
    pages: HashMap<u32, FeedPage>,
    articles: HashMap<String, Article>,
    failure: Option<ErrorFactory>,
    delay: Option<Duration>,
    article_requests: AtomicUsize,
}

impl MockClubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `page` for requests of page number `number`
    pub fn with_page(mut self, number: u32, page: FeedPage) -> Self {
        self.pages.insert(number, page);
        self
    }

    /// Serve `article` for `reference`
    pub fn with_article(mut self, reference: &str, article: Article) -> Self {
        self.articles.insert(reference.to_string(), article);
        self
    }

    /// Fail every request with the produced error
    pub fn fail_with(mut self, error: impl Fn() -> ClubError + Send + Sync + 'static) -> Self {
        self.failure = Some(Box::new(error));
        self
    }

    /// Sleep before answering feed requests
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn article_requests(&self) -> usize {
        self.article_requests.load(Ordering::SeqCst)
    }

    fn not_found(what: &str) -> ClubError {
        ClubError::UnexpectedStatus {
            status: 404,
            reason: "Not Found".to_string(),
            body: format!("no such {}", what),
        }
    }
}

#[async_trait]
impl ClubClient for MockClubClient {
    async fn fetch_feed(&self, page: u32) -> Result<FeedPage, ClubError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(failure) = &self.failure {
            return Err(failure());
        }

        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| Self::not_found("page"))
    }

    async fn fetch_article(&self, reference: &str) -> Result<Article, ClubError> {
        self.article_requests.fetch_add(1, Ordering::SeqCst);

        if let Some(failure) = &self.failure {
            return Err(failure());
        }

        self.articles
            .get(reference)
            .cloned()
            .ok_or_else(|| Self::not_found("article"))
    }
}
