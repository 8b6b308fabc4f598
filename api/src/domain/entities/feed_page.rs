//! Feed page domain entities
//!
//! One page of the club's JSON Feed, as served by `/all/new/feed.json`.
//! Upstream omits optional fields freely, so every struct decodes missing
//! fields to their defaults.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Body text served in place of content the API withholds
pub const LOCK_SENTINEL: &str = "🔒";

/// Base for profile URLs given as an absolute path
const CLUB_BASE: &str = "https://vas3k.club/";

/// A single page of the upstream feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedPage {
    pub version: String,
    pub title: String,
    pub home_page_url: String,
    pub feed_url: String,
    pub next_url: String,
    pub items: Vec<FeedItem>,
}

/// One syndication entry of a feed page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedItem {
    pub id: String,
    pub url: String,
    pub title: String,
    pub content_text: String,
    pub date_published: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub authors: Vec<ItemAuthor>,
    #[serde(rename = "_club")]
    pub club: ClubInfo,
}

impl FeedItem {
    /// Path of the item's article, relative to the API endpoint
    pub fn reference(&self) -> String {
        self.club.reference()
    }

    /// Whether the body is the locked placeholder
    pub fn is_locked(&self) -> bool {
        self.content_text.trim() == LOCK_SENTINEL
    }

    /// Usernames of every author, in order
    pub fn usernames(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.authors.iter().map(ItemAuthor::username)
    }
}

/// Display information about an item author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemAuthor {
    pub name: String,
    pub url: String,
    pub avatar: String,
}

impl ItemAuthor {
    /// Stable identifier used by author block-lists.
    ///
    /// The club does not send usernames, but every profile URL ends with one
    /// (`https://vas3k.club/user/alice/`). The last path segment is
    /// percent-decoded. Falls back to the display name when the URL carries
    /// no path or does not parse.
    pub fn username(&self) -> Cow<'_, str> {
        let segment = self.profile_url().and_then(|url| {
            url.path_segments()?
                .filter(|segment| !segment.is_empty())
                .last()
                .map(str::to_string)
        });

        match segment {
            Some(segment) => Cow::Owned(
                urlencoding::decode(&segment)
                    .map(Cow::into_owned)
                    .unwrap_or(segment),
            ),
            None => Cow::Borrowed(self.name.as_str()),
        }
    }

    fn profile_url(&self) -> Option<Url> {
        match Url::parse(&self.url) {
            Ok(url) => Some(url),
            Err(url::ParseError::RelativeUrlWithoutBase) if self.url.starts_with('/') => {
                Url::parse(CLUB_BASE).ok()?.join(&self.url).ok()
            }
            Err(_) => None,
        }
    }
}

/// Club-specific engagement and visibility metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub slug: String,
    pub comment_count: i64,
    pub view_count: i64,
    pub upvotes: i64,
    pub is_public: bool,
    pub is_commentable: bool,
}

impl ClubInfo {
    /// `{type}/{slug}.json`, skipping empty segments
    pub fn reference(&self) -> String {
        let path = [self.kind.as_str(), self.slug.as_str()]
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/");

        format!("{}.json", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(name: &str, url: &str) -> ItemAuthor {
        ItemAuthor {
            name: name.to_string(),
            url: url.to_string(),
            avatar: String::new(),
        }
    }

    #[test]
    fn username_from_profile_url() {
        assert_eq!(
            author("Alice", "https://vas3k.club/user/alice/").username(),
            "alice"
        );
        assert_eq!(
            author("Bob", "https://vas3k.club/user/bob").username(),
            "bob"
        );
        assert_eq!(
            author("Carol", "https://vas3k.club/user/carol/?tab=posts").username(),
            "carol"
        );
    }

    #[test]
    fn username_falls_back_to_name() {
        assert_eq!(author("Alice", "").username(), "Alice");
        assert_eq!(author("Alice", "https://vas3k.club/").username(), "Alice");
        assert_eq!(author("Alice", "vas3k.club").username(), "Alice");
        assert_eq!(author("Alice", "mailto:alice@vas3k.club").username(), "Alice");
    }

    #[test]
    fn username_ignores_query_and_fragment() {
        assert_eq!(
            author("Alice", "https://vas3k.club?from=/feed/").username(),
            "Alice"
        );
        assert_eq!(
            author("Dave", "https://vas3k.club/user/dave/#posts").username(),
            "dave"
        );
    }

    #[test]
    fn username_is_percent_decoded() {
        assert_eq!(
            author("Иван", "https://vas3k.club/user/%D0%B8%D0%B2%D0%B0%D0%BD/").username(),
            "иван"
        );
    }

    #[test]
    fn username_from_absolute_path() {
        assert_eq!(author("Eve", "/user/eve/").username(), "eve");
    }

    #[test]
    fn reference_joins_type_and_slug() {
        let club = ClubInfo {
            kind: "post".to_string(),
            slug: "hello-world".to_string(),
            ..Default::default()
        };
        assert_eq!(club.reference(), "post/hello-world.json");

        let club = ClubInfo {
            slug: "orphan".to_string(),
            ..Default::default()
        };
        assert_eq!(club.reference(), "orphan.json");
    }

    #[test]
    fn decodes_upstream_page() {
        let json = r#"{
            "version": "https://jsonfeed.org/version/1.1",
            "title": "Вастрик.Клуб",
            "home_page_url": "https://vas3k.club/",
            "feed_url": "https://vas3k.club/all/new/feed.json",
            "items": [{
                "id": "https://vas3k.club/post/1/",
                "url": "https://vas3k.club/post/1/",
                "title": "First",
                "content_text": "🔒",
                "date_published": "2024-05-01T10:00:00+03:00",
                "date_modified": "2024-05-01T12:00:00Z",
                "authors": [{"name": "Alice", "url": "https://vas3k.club/user/alice/"}],
                "_club": {"type": "post", "slug": "1", "upvotes": 4, "comment_count": 2}
            }]
        }"#;

        let page: FeedPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.next_url, "");
        assert_eq!(page.items.len(), 1);
        let item = &page.items[0];
        assert!(item.is_locked());
        assert_eq!(item.club.kind, "post");
        assert_eq!(item.club.upvotes, 4);
        assert_eq!(item.reference(), "post/1.json");
        assert_eq!(item.date_published.to_rfc3339(), "2024-05-01T07:00:00+00:00");
        assert_eq!(item.usernames().collect::<Vec<_>>(), vec!["alice"]);
    }
}
