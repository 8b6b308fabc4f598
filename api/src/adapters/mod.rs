//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod club;

pub use club::{ClubHttpClient, TransportOptions};
