//! Request logging middleware

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, MatchedPath},
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::error::FailureReport;

/// Log one line per request once the response is ready.
///
/// Records the matched route, the raw path, the peer address when the
/// server was started with connect info, the status and the duration.
/// Failed requests log at error level with the [`FailureReport`].
pub async fn request_log(request: Request<Body>, next: Next) -> Response {
    let started = Instant::now();

    let path = request.uri().path().to_string();
    let handler = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_default();
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let duration_ms = started.elapsed().as_millis() as u64;

    match response.extensions().get::<FailureReport>() {
        Some(FailureReport(error)) => tracing::error!(
            handler = %handler,
            path = %path,
            remote_addr = %remote_addr,
            status,
            duration_ms,
            error = %error,
            "request failed"
        ),
        None => tracing::info!(
            handler = %handler,
            path = %path,
            remote_addr = %remote_addr,
            status,
            duration_ms,
            "request served"
        ),
    }

    response
}
