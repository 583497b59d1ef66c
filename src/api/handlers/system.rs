//! System endpoints: health check and filter configuration.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::ADULT_AGE_THRESHOLD;
use crate::persistence::seed::SEED_RECORDS;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Adult filter settings.
#[derive(Debug, Serialize, ToSchema)]
struct FilterConfigResponse {
    threshold: u64,
    comparison: &'static str,
    seed_count: usize,
}

/// `GET /config/filter` — Describe the adult filter.
#[utoipa::path(
    get,
    path = "/config/filter",
    tag = "System",
    summary = "Filter settings",
    description = "Returns the age threshold, how it is compared, and how many records a fresh store is seeded with.",
    responses(
        (status = 200, description = "Filter settings", body = FilterConfigResponse),
    )
)]
pub async fn filter_config_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(FilterConfigResponse {
            threshold: ADULT_AGE_THRESHOLD,
            comparison: "greater_than",
            seed_count: SEED_RECORDS.len(),
        }),
    )
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/filter", get(filter_config_handler))
}
