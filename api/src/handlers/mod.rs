//! HTTP handlers
//!
//! Axum request handlers for the public endpoints.

pub mod feed;
pub mod index;

pub use feed::{get_feed, get_page};
pub use index::{health, index};
