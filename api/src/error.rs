//! Unified error types for the atomizer
//!
//! This module defines error types for each layer:
//! - `ClubError`: club API client errors
//! - `FeedError`: syndication format encoding errors
//! - `ConfigError`: startup configuration errors
//! - `AppError`: request-level errors (converted into HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::feed::FeedFormat;

/// Club API client errors
#[derive(Debug, Error)]
pub enum ClubError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("performing http request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected http status {status} {reason:?}: {body:?}")]
    UnexpectedStatus {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("response body exceeds {limit} bytes")]
    ResponseTooLarge { limit: usize },

    #[error("decoding json response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response body is not valid UTF-8")]
    InvalidBody,
}

/// Syndication format encoding errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("encoding rss: {0}")]
    Rss(#[from] rss::Error),

    #[error("encoding atom: {0}")]
    Atom(#[from] atom_syndication::Error),

    #[error("encoding json feed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors, fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} env is not set")]
    Missing(&'static str),

    #[error("invalid {key} env {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid format. Available formats: {}", FeedFormat::available())]
    InvalidFormat,

    #[error("invalid page number: {0}")]
    InvalidPage(#[from] std::num::ParseIntError),

    #[error("{0}")]
    Club(#[from] ClubError),

    #[error("{0}")]
    Feed(#[from] FeedError),

    #[error("deadline of {0:?} exceeded")]
    Timeout(std::time::Duration),
}

/// Message of a failed request, attached to the response so the request
/// log can report it next to the path, peer and duration
#[derive(Debug, Clone)]
pub struct FailureReport(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidFormat | AppError::InvalidPage(_) => StatusCode::BAD_REQUEST,
            AppError::Club(_) | AppError::Feed(_) | AppError::Timeout(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if !status.is_server_error() {
            return (status, self.to_string()).into_response();
        }

        let mut response = (status, format!("unable to fetch feed: {}", self)).into_response();
        response
            .extensions_mut()
            .insert(FailureReport(self.to_string()));
        response
    }
}
