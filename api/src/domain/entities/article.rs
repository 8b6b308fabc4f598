//! Article domain entity
//!
//! Result of fetching a single item by its reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClubInfo, ItemAuthor};

/// A single post fetched by reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub post: Post,
}

/// Full post content, same shape as a feed item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: String,
    pub url: String,
    pub title: String,
    pub content_text: String,
    pub date_published: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub authors: Vec<ItemAuthor>,
    #[serde(rename = "_club", alias = "club")]
    pub club: ClubInfo,
}
