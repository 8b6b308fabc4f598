//! Club adapter
//!
//! HTTP implementation of the club API client.

pub mod client;

pub use client::{ClubHttpClient, TransportOptions};
