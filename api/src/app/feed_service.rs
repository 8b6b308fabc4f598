//! Feed service
//!
//! Runs the fetch → filter → render pipeline for one requested page.

use std::sync::Arc;
use std::time::Duration;

use crate::app::ItemFilter;
use crate::domain::entities::FeedPage;
use crate::domain::ports::ClubClient;
use crate::error::AppError;
use crate::feed::{ContentRenderer, Feed};

/// Pipeline tuning
#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// Fetch full bodies for locked items in listings
    pub resolve_locked: bool,
    /// Deadline for the whole pipeline of one request
    pub deadline: Duration,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            resolve_locked: false,
            deadline: Duration::from_secs(60),
        }
    }
}

/// Service producing rendered feeds from the club API
pub struct FeedService<C>
where
    C: ClubClient,
{
    client: Arc<C>,
    filter: ItemFilter,
    renderer: ContentRenderer,
    options: FeedOptions,
}

impl<C> FeedService<C>
where
    C: ClubClient,
{
    pub fn new(
        client: Arc<C>,
        filter: ItemFilter,
        renderer: ContentRenderer,
        options: FeedOptions,
    ) -> Self {
        Self {
            client,
            filter,
            renderer,
            options,
        }
    }

    /// Fetch, filter and render one page of the feed
    pub async fn build_feed(&self, page: u32) -> Result<Feed, AppError> {
        let deadline = self.options.deadline;

        tokio::time::timeout(deadline, self.build_feed_inner(page))
            .await
            .map_err(|_| AppError::Timeout(deadline))?
    }

    async fn build_feed_inner(&self, page: u32) -> Result<Feed, AppError> {
        let mut feed_page = self.client.fetch_feed(page).await?;

        let removed = self.filter.apply(&mut feed_page);
        if removed > 0 {
            tracing::debug!(page, removed, kept = feed_page.items.len(), "filtered feed items");
        }

        if self.options.resolve_locked {
            self.resolve_locked(&mut feed_page).await;
        }

        Ok(Feed::from_page(&feed_page, &self.renderer))
    }

    /// Replace locked bodies with the full article text.
    ///
    /// Failures keep the placeholder so one bad article does not sink the page.
    async fn resolve_locked(&self, feed_page: &mut FeedPage) {
        for item in feed_page.items.iter_mut().filter(|item| item.is_locked()) {
            let reference = item.reference();

            match self.client.fetch_article(&reference).await {
                Ok(article) => item.content_text = article.post.content_text,
                Err(e) => {
                    tracing::warn!(error = %e, reference = %reference, "Failed to resolve locked item");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClubError;
    use crate::test_utils::{test_article, test_item, test_page, MockClubClient};
    use pretty_assertions::assert_eq;

    fn create_service(
        client: MockClubClient,
        filter: ItemFilter,
        options: FeedOptions,
    ) -> FeedService<MockClubClient> {
        FeedService::new(
            Arc::new(client),
            filter,
            ContentRenderer::default(),
            options,
        )
    }

    #[tokio::test]
    async fn build_feed_filters_and_renders() {
        let client = MockClubClient::new().with_page(
            1,
            test_page(vec![
                test_item("1", "post", &["alice"]),
                test_item("2", "intro", &["bob"]),
                test_item("3", "post", &["mallory"]),
            ]),
        );
        let service = create_service(
            client,
            ItemFilter::new(["intro"], ["mallory"]),
            FeedOptions::default(),
        );

        let feed = service.build_feed(1).await.unwrap();

        let ids: Vec<_> = feed.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
        assert_eq!(feed.entries[0].author, "alice");
    }

    #[tokio::test]
    async fn build_feed_requests_the_given_page() {
        let client = MockClubClient::new().with_page(4, test_page(vec![test_item("p4", "post", &[])]));
        let service = create_service(client, ItemFilter::default(), FeedOptions::default());

        let feed = service.build_feed(4).await.unwrap();
        assert_eq!(feed.entries[0].id, "p4");

        assert!(service.build_feed(5).await.is_err());
    }

    #[tokio::test]
    async fn build_feed_propagates_client_errors() {
        let client = MockClubClient::new().fail_with(|| ClubError::UnexpectedStatus {
            status: 503,
            reason: "Service Unavailable".to_string(),
            body: "down".to_string(),
        });
        let service = create_service(client, ItemFilter::default(), FeedOptions::default());

        let err = service.build_feed(1).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Club(ClubError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn locked_items_stay_locked_by_default() {
        let mut locked = test_item("1", "post", &[]);
        locked.content_text = "🔒".to_string();

        let client = MockClubClient::new()
            .with_page(1, test_page(vec![locked.clone()]))
            .with_article(&locked.reference(), test_article("Full text"));
        let client = Arc::new(client);
        let service = FeedService::new(
            client.clone(),
            ItemFilter::default(),
            ContentRenderer::default(),
            FeedOptions::default(),
        );

        let feed = service.build_feed(1).await.unwrap();

        assert_eq!(feed.entries[0].description, "<p>💚0 💬0 🔒</p>");
        assert_eq!(client.article_requests(), 0);
    }

    #[tokio::test]
    async fn locked_items_resolved_when_enabled() {
        let mut locked = test_item("1", "post", &[]);
        locked.content_text = "🔒".to_string();
        let open = test_item("2", "post", &[]);

        let client = MockClubClient::new()
            .with_page(1, test_page(vec![locked.clone(), open]))
            .with_article(&locked.reference(), test_article("Full text"));
        let client = Arc::new(client);
        let service = FeedService::new(
            client.clone(),
            ItemFilter::default(),
            ContentRenderer::default(),
            FeedOptions {
                resolve_locked: true,
                ..Default::default()
            },
        );

        let feed = service.build_feed(1).await.unwrap();

        assert_eq!(feed.entries[0].content, "<p>Full text</p>");
        assert_eq!(client.article_requests(), 1);
    }

    #[tokio::test]
    async fn unresolvable_locked_item_keeps_placeholder() {
        let mut locked = test_item("1", "post", &[]);
        locked.content_text = "🔒".to_string();

        let client = MockClubClient::new().with_page(1, test_page(vec![locked]));
        let service = create_service(
            client,
            ItemFilter::default(),
            FeedOptions {
                resolve_locked: true,
                ..Default::default()
            },
        );

        let feed = service.build_feed(1).await.unwrap();
        assert_eq!(feed.entries[0].content, "<p>🔒</p>");
    }

    #[tokio::test]
    async fn slow_upstream_hits_deadline() {
        let client = MockClubClient::new()
            .with_page(1, test_page(vec![]))
            .with_delay(Duration::from_secs(5));
        let service = create_service(
            client,
            ItemFilter::default(),
            FeedOptions {
                deadline: Duration::from_millis(20),
                ..Default::default()
            },
        );

        let err = service.build_feed(1).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout(_)));
    }
}
