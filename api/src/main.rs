//! Vas3k.club feed atomizer
//!
//! Fetches the club's JSON feed, drops blocked items, renders their markdown
//! and serves the result as RSS, Atom or JSON Feed.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{middleware::from_fn, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;
mod handlers;
mod middleware;

#[cfg(test)]
mod test_utils;

use adapters::{ClubHttpClient, TransportOptions};
use app::{FeedOptions, FeedService, ItemFilter};
use config::Config;
use feed::ContentRenderer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<FeedService<ClubHttpClient>>,
}

/// Build the router with every public route and the logging layers
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/feed/:format", get(handlers::get_feed))
        .route("/page/:page/:format", get(handlers::get_page))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(middleware::request_log)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // LOG_LEVEL wins over RUST_LOG
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| "info,atomizer=debug".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting atomizer...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let client = ClubHttpClient::new(
        &config.club_endpoint,
        config.club_token.clone(),
        TransportOptions {
            request_timeout: config.request_timeout,
            max_connections: config.upstream_connections,
        },
    )
    .context("failed to build club client")?;

    let filter = ItemFilter::new(
        config.blocked_types.iter().cloned(),
        config.blocked_authors.iter().cloned(),
    );
    tracing::info!(
        endpoint = %config.club_endpoint,
        blocked_types = ?config.blocked_types,
        blocked_authors = ?config.blocked_authors,
        resolve_locked = config.resolve_locked,
        "Club client ready"
    );

    let feed_service = Arc::new(FeedService::new(
        Arc::new(client),
        filter,
        ContentRenderer::default(),
        FeedOptions {
            resolve_locked: config.resolve_locked,
            deadline: config.feed_deadline(),
        },
    ));

    let app = build_router(AppState { feed_service });

    let listener = tokio::net::TcpListener::bind(&config.serve_at)
        .await
        .with_context(|| format!("failed to bind {}", config.serve_at))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
