//! Feed handlers
//!
//! Endpoints serving the club feed as RSS, Atom or JSON Feed.
//! The format is validated before anything is fetched upstream.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::feed::FeedFormat;
use crate::AppState;

/// GET /feed/:format
///
/// Returns the first page of the feed.
pub async fn get_feed(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> Result<Response, AppError> {
    let format: FeedFormat = format.parse()?;

    serve_page(&state, 1, format).await
}

/// GET /page/:page/:format
///
/// Returns the requested page. Pages below 1 are served as page 1.
pub async fn get_page(
    State(state): State<AppState>,
    Path((page, format)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let format: FeedFormat = format.parse()?;
    let page = parse_page(&page)?;

    serve_page(&state, page, format).await
}

/// Parse a page number, clamping anything below 1 up to 1
pub fn parse_page(raw: &str) -> Result<u32, AppError> {
    let page: i64 = raw.parse()?;
    Ok(page.clamp(1, i64::from(u32::MAX)) as u32)
}

async fn serve_page(state: &AppState, page: u32, format: FeedFormat) -> Result<Response, AppError> {
    let feed = state.feed_service.build_feed(page).await?;
    let body = format.render(&feed)?;

    Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
}
