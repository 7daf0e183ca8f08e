use crate::report::Aggregator;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Body of `POST /scrape` and query of `GET /scrape`
#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: Option<String>,
}

pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn scrape_json(
    State(aggregator): State<Arc<Aggregator>>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(request)) => scrape(&aggregator, request.url).await,
        Err(rejection) => {
            tracing::debug!("Rejected scrape body: {}", rejection);
            invalid_url()
        }
    }
}

pub async fn scrape_query(
    State(aggregator): State<Arc<Aggregator>>,
    query: Result<Query<ScrapeRequest>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(request)) => scrape(&aggregator, request.url).await,
        Err(rejection) => {
            tracing::debug!("Rejected scrape query: {}", rejection);
            invalid_url()
        }
    }
}

async fn scrape(aggregator: &Aggregator, url: Option<String>) -> Response {
    let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
        return invalid_url();
    };

    match aggregator.scrape(&url).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) if e.is_client_error() => {
            tracing::debug!("Rejected scrape request: {}", e);
            invalid_url()
        }
        Err(e) => {
            tracing::error!("Error scraping data: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal Server Error"})),
            )
                .into_response()
        }
    }
}

fn invalid_url() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Invalid URL provided"})),
    )
        .into_response()
}
