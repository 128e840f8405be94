//! System endpoints: health check and effective configuration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ThresholdsResponse;
use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and the service clock's current time.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: state.workbench.now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /config/thresholds`: Effective thresholds.
#[utoipa::path(
    get,
    path = "/config/thresholds",
    tag = "System",
    summary = "Effective thresholds",
    description = "Returns the option and dashboard thresholds in effect and the default option duration.",
    responses(
        (status = 200, description = "Thresholds", body = ThresholdsResponse),
    )
)]
pub async fn thresholds_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(ThresholdsResponse {
        thresholds: *state.workbench.thresholds(),
        default_option_term_days: state.workbench.default_option_duration_days(),
    })
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/thresholds", get(thresholds_handler))
}
