//! HTTP API
//!
//! - `GET /health`
//! - `POST /scrape` with `{"url": "..."}`
//! - `GET /scrape?url=...`
//!
//! Scrape responses are the JSON report (200), `{"error": "Invalid URL
//! provided"}` (400), or `{"error": "Internal Server Error"}` (500). Internal
//! error details are logged, never returned.

mod handlers;

pub use handlers::ScrapeRequest;

use crate::report::Aggregator;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the API router around a shared aggregator
pub fn router(aggregator: Arc<Aggregator>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/scrape",
            get(handlers::scrape_query).post(handlers::scrape_json),
        )
        .with_state(aggregator)
}

/// Serves the API on an already bound listener until the process exits
pub async fn serve(listener: TcpListener, aggregator: Arc<Aggregator>) -> std::io::Result<()> {
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(aggregator)).await
}
