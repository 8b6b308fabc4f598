//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and the feed renderer.

pub mod feed_service;
pub mod item_filter;

pub use feed_service::{FeedOptions, FeedService};
pub use item_filter::ItemFilter;
