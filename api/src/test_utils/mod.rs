//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The HTTP client itself is exercised against wiremock; everything above it
//! runs against the in-memory `MockClubClient`.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
