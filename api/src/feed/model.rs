//! Generic feed model
//!
//! Format-neutral view of a rendered feed page. Every wire format is a
//! structural mapping of these types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{FeedItem, FeedPage, ItemAuthor};

use super::ContentRenderer;

/// A rendered feed ready for serialization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub entries: Vec<FeedEntry>,
}

/// One rendered entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub id: String,
    pub title: String,
    pub link: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    /// Sanitized summary HTML
    pub description: String,
    /// Sanitized full-body HTML
    pub content: String,
    /// Author display names joined by ", "
    pub author: String,
}

impl Feed {
    pub fn from_page(page: &FeedPage, renderer: &ContentRenderer) -> Self {
        Self {
            title: page.title.clone(),
            link: page.home_page_url.clone(),
            entries: page
                .items
                .iter()
                .map(|item| FeedEntry::from_item(item, renderer))
                .collect(),
        }
    }

    /// Most recent entry update, if there are entries
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|entry| entry.updated).max()
    }
}

impl FeedEntry {
    pub fn from_item(item: &FeedItem, renderer: &ContentRenderer) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            link: item.url.clone(),
            created: item.date_published,
            updated: item.date_modified,
            description: renderer.summary(item),
            content: renderer.content(item),
            author: compose_authors(&item.authors),
        }
    }
}

fn compose_authors(authors: &[ItemAuthor]) -> String {
    authors
        .iter()
        .map(|author| author.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
