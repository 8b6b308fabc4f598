//! Wire formats
//!
//! Encodes a [`Feed`] as RSS 2.0, Atom 1.0 or JSON Feed 1.1.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use atom_syndication::{Content, Entry, FixedDateTime, Link, Person, Text};
use chrono::Utc;
use rss::{Channel, Guid, Item};
use serde::Serialize;

use crate::error::{AppError, FeedError};

use super::{Feed, FeedEntry};

const RSS_CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedFormat {
    Atom,
    Json,
    Rss,
}

impl FeedFormat {
    pub const ALL: [FeedFormat; 3] = [FeedFormat::Atom, FeedFormat::Json, FeedFormat::Rss];

    pub fn as_str(self) -> &'static str {
        match self {
            FeedFormat::Atom => "atom",
            FeedFormat::Json => "json",
            FeedFormat::Rss => "rss",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            FeedFormat::Atom => "application/atom+xml",
            FeedFormat::Json => "application/json",
            FeedFormat::Rss => "application/rss+xml",
        }
    }

    /// Comma-separated list of every format name
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|format| format.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn render(self, feed: &Feed) -> Result<Vec<u8>, FeedError> {
        match self {
            FeedFormat::Atom => render_atom(feed),
            FeedFormat::Json => render_json(feed),
            FeedFormat::Rss => render_rss(feed),
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or(AppError::InvalidFormat)
    }
}

// ============================================================================
// RSS
// ============================================================================

fn render_rss(feed: &Feed) -> Result<Vec<u8>, FeedError> {
    let mut channel = Channel::default();
    channel.set_title(feed.title.clone());
    channel.set_link(feed.link.clone());
    channel.set_description(feed.title.clone());
    channel.set_namespaces(BTreeMap::from([(
        "content".to_string(),
        RSS_CONTENT_NAMESPACE.to_string(),
    )]));
    channel.set_items(feed.entries.iter().map(rss_item).collect::<Vec<_>>());

    Ok(channel.write_to(Vec::new())?)
}

fn rss_item(entry: &FeedEntry) -> Item {
    let mut guid = Guid::default();
    guid.set_value(entry.id.clone());
    guid.set_permalink(false);

    let mut item = Item::default();
    item.set_title(entry.title.clone());
    item.set_link(entry.link.clone());
    item.set_guid(guid);
    item.set_pub_date(entry.created.to_rfc2822());
    item.set_description(entry.description.clone());
    item.set_content(entry.content.clone());
    if !entry.author.is_empty() {
        item.set_author(entry.author.clone());
    }

    item
}

// ============================================================================
// Atom
// ============================================================================

fn render_atom(feed: &Feed) -> Result<Vec<u8>, FeedError> {
    let updated: FixedDateTime = feed.updated().unwrap_or_else(Utc::now).into();

    let mut atom = atom_syndication::Feed::default();
    atom.set_title(feed.title.clone());
    atom.set_id(feed.link.clone());
    atom.set_updated(updated);
    atom.set_links(vec![atom_link(&feed.link)]);
    atom.set_entries(feed.entries.iter().map(atom_entry).collect::<Vec<_>>());

    Ok(atom.write_to(Vec::new())?)
}

fn atom_entry(entry: &FeedEntry) -> Entry {
    let published: FixedDateTime = entry.created.into();
    let updated: FixedDateTime = entry.updated.into();

    let mut content = Content::default();
    content.set_content_type("html".to_string());
    content.set_value(entry.content.clone());

    let mut atom = Entry::default();
    atom.set_title(entry.title.clone());
    atom.set_id(entry.id.clone());
    atom.set_updated(updated);
    atom.set_published(published);
    atom.set_links(vec![atom_link(&entry.link)]);
    atom.set_summary(Text::html(entry.description.clone()));
    atom.set_content(content);

    if !entry.author.is_empty() {
        let mut author = Person::default();
        author.set_name(entry.author.clone());
        atom.set_authors(vec![author]);
    }

    atom
}

fn atom_link(href: &str) -> Link {
    let mut link = Link::default();
    link.set_href(href);
    link
}

// ============================================================================
// JSON Feed
// ============================================================================

#[derive(Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    items: Vec<JsonFeedItem<'a>>,
}

#[derive(Serialize)]
struct JsonFeedItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    summary: &'a str,
    content_html: &'a str,
    date_published: String,
    date_modified: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authors: Vec<JsonFeedAuthor<'a>>,
}

#[derive(Serialize)]
struct JsonFeedAuthor<'a> {
    name: &'a str,
}

fn render_json(feed: &Feed) -> Result<Vec<u8>, FeedError> {
    let json = JsonFeed {
        version: JSON_FEED_VERSION,
        title: &feed.title,
        home_page_url: &feed.link,
        items: feed
            .entries
            .iter()
            .map(|entry| JsonFeedItem {
                id: &entry.id,
                url: &entry.link,
                title: &entry.title,
                summary: &entry.description,
                content_html: &entry.content,
                date_published: entry.created.to_rfc3339(),
                date_modified: entry.updated.to_rfc3339(),
                authors: if entry.author.is_empty() {
                    Vec::new()
                } else {
                    vec![JsonFeedAuthor {
                        name: &entry.author,
                    }]
                },
            })
            .collect(),
    };

    Ok(serde_json::to_vec_pretty(&json)?)
}
