//! Club API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tokio::sync::Semaphore;
use url::Url;

use crate::domain::entities::{Article, FeedPage, LOCK_SENTINEL};
use crate::domain::ports::ClubClient;
use crate::error::ClubError;

/// Hard ceiling for any upstream response body
pub const MAX_BODY_SIZE: usize = 1 << 20;

/// How much of an error response is kept for diagnostics
const MAX_ERROR_BODY: usize = 512;

const FEED_PATH: &str = "/all/new/feed.json";
const TOKEN_HEADER: &str = "X-Service-Token";

/// Transport tuning for a single upstream host
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Total time allowed for one request, body included
    pub request_timeout: Duration,
    /// Upstream requests allowed in flight at once
    pub max_connections: usize,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_connections: 1,
        }
    }
}

/// HTTP implementation of the club API client
pub struct ClubHttpClient {
    http: Client,
    endpoint: Url,
    token: String,
    permits: Semaphore,
}

impl ClubHttpClient {
    pub fn new(endpoint: &str, token: String, options: TransportOptions) -> Result<Self, ClubError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClubError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        // Tuned for one host: few idle connections, every stage bounded
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(180))
            .pool_max_idle_per_host(1)
            .timeout(options.request_timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            token,
            permits: Semaphore::new(options.max_connections.max(1)),
        })
    }

    fn feed_url(&self, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.set_path(FEED_PATH);

        if page > 0 {
            url.query_pairs_mut()
                .append_pair("page", &page.to_string());
        }

        url
    }

    fn article_url(&self, reference: &str) -> Result<Url, ClubError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ClubError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(reference.split('/').filter(|segment| !segment.is_empty()));

        Ok(url)
    }

    /// Perform one authenticated GET and return the capped body
    async fn get(&self, url: Url) -> Result<Vec<u8>, ClubError> {
        // The semaphore is never closed, so a permit is always granted
        let _permit = self.permits.acquire().await.ok();

        tracing::debug!(url = %url, "club request");

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(unexpected_status(response).await);
        }

        read_limited(response, MAX_BODY_SIZE).await
    }
}

#[async_trait]
impl ClubClient for ClubHttpClient {
    async fn fetch_feed(&self, page: u32) -> Result<FeedPage, ClubError> {
        let body = self.get(self.feed_url(page)).await?;
        let feed: FeedPage = serde_json::from_slice(&body)?;

        tracing::debug!(page, items = feed.items.len(), "fetched feed page");

        Ok(feed)
    }

    async fn fetch_article(&self, reference: &str) -> Result<Article, ClubError> {
        let body = self.get(self.article_url(reference)?).await?;
        let mut article: Article = serde_json::from_slice(&body)?;

        if article.post.content_text == LOCK_SENTINEL {
            let base = article
                .post
                .url
                .strip_suffix('/')
                .unwrap_or(article.post.url.as_str());
            let target = format!("{}.md", base);

            tracing::debug!(reference, target = %target, "fetching locked article body");

            let url = Url::parse(&target)
                .map_err(|e| ClubError::InvalidEndpoint(format!("{}: {}", target, e)))?;
            let body = self.get(url).await?;

            article.post.content_text = String::from_utf8(body).map_err(|_| ClubError::InvalidBody)?;
        }

        Ok(article)
    }
}

async fn unexpected_status(mut response: Response) -> ClubError {
    let status = response.status();

    let mut body = Vec::new();
    while body.len() < MAX_ERROR_BODY {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            _ => break,
        }
    }
    body.truncate(MAX_ERROR_BODY);

    ClubError::UnexpectedStatus {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

async fn read_limited(mut response: Response, limit: usize) -> Result<Vec<u8>, ClubError> {
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(ClubError::ResponseTooLarge { limit });
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len().saturating_add(chunk.len()) > limit {
            return Err(ClubError::ResponseTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
