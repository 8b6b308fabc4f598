//! Domain layer
//!
//! Contains pure data models with no I/O.
//! - `entities`: models of the upstream feed
//! - `ports`: trait definitions for external dependencies

pub mod entities;
pub mod ports;
