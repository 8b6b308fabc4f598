//! Domain entities
//!
//! Request-scoped models of the club feed as the upstream API serves it.

pub mod article;
pub mod feed_page;

pub use article::{Article, Post};
pub use feed_page::{ClubInfo, FeedItem, FeedPage, ItemAuthor, LOCK_SENTINEL};
