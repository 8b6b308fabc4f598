//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Article, ClubInfo, FeedItem, FeedPage, ItemAuthor, Post};

fn test_time() -> DateTime<Utc> {
    "2024-05-01T10:00:00Z".parse().unwrap()
}

/// Create an author whose profile URL ends with `username`
pub fn test_author(username: &str) -> ItemAuthor {
    ItemAuthor {
        name: username.to_string(),
        url: format!("https://vas3k.club/user/{}/", username),
        avatar: format!("https://i.vas3k.club/{}.png", username),
    }
}

/// Create a feed item of the given type and authors
pub fn test_item(id: &str, kind: &str, authors: &[&str]) -> FeedItem {
    FeedItem {
        id: id.to_string(),
        url: format!("https://vas3k.club/{}/{}/", kind, id),
        title: format!("Item {}", id),
        content_text: format!("Body of {}", id),
        date_published: test_time(),
        date_modified: test_time(),
        authors: authors.iter().map(|name| test_author(name)).collect(),
        club: ClubInfo {
            kind: kind.to_string(),
            slug: id.to_string(),
            is_public: true,
            is_commentable: true,
            ..Default::default()
        },
    }
}

/// Create a page holding `items`
pub fn test_page(items: Vec<FeedItem>) -> FeedPage {
    FeedPage {
        version: "https://jsonfeed.org/version/1.1".to_string(),
        title: "Вастрик.Клуб".to_string(),
        home_page_url: "https://vas3k.club/".to_string(),
        feed_url: "https://vas3k.club/all/new/feed.json".to_string(),
        next_url: "https://vas3k.club/all/new/feed.json?page=2".to_string(),
        items,
    }
}

/// Create an article with the given body
pub fn test_article(content: &str) -> Article {
    Article {
        post: Post {
            id: "article".to_string(),
            url: "https://vas3k.club/post/article/".to_string(),
            title: "Article".to_string(),
            content_text: content.to_string(),
            date_published: test_time(),
            date_modified: test_time(),
            ..Default::default()
        },
    }
}
