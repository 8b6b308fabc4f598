//! Feed module
//!
//! Rendering of club items into syndication feeds.
//! - `content`: markdown to sanitized HTML
//! - `model`: format-neutral feed model
//! - `format`: RSS, Atom and JSON Feed encoders

pub mod content;
pub mod format;
pub mod model;

pub use content::ContentRenderer;
pub use format::FeedFormat;
pub use model::{Feed, FeedEntry};
