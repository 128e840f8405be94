//! Workbench list and dashboard handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{DashboardRequest, ReservationQueryRequest};
use crate::app_state::AppState;
use crate::service::workbench_service::{Dashboard, QueryOutcome};

/// `POST /reservations/query`: Filtered workbench list.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/query",
    tag = "Reservations",
    summary = "Filter reservations",
    description = "Applies status, payment, event, arrangement and search filters. Waitlist entries are never returned. Results are ordered newest first.",
    request_body = ReservationQueryRequest,
    responses(
        (status = 200, description = "Filtered list with totals", body = QueryOutcome),
    )
)]
pub async fn query_reservations(
    State(state): State<AppState>,
    Json(req): Json<ReservationQueryRequest>,
) -> impl IntoResponse {
    Json(
        state
            .workbench
            .query(&req.reservations, req.query, req.preset),
    )
}

/// `POST /reservations/dashboard`: Statistics and focus items.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/dashboard",
    tag = "Reservations",
    summary = "Dashboard statistics",
    description = "Counts, revenue, warnings and the prioritized focus list over all reservations outside the waitlist.",
    request_body = DashboardRequest,
    responses(
        (status = 200, description = "Dashboard", body = Dashboard),
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Json(req): Json<DashboardRequest>,
) -> impl IntoResponse {
    Json(state.workbench.dashboard(&req.reservations, &req.events))
}

/// Reservation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations/query", post(query_reservations))
        .route("/reservations/dashboard", post(dashboard))
}
