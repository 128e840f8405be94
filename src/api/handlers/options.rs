//! Option-hold and option-term handlers.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    ClassifyRequest, DefaultTermResponse, ExpiryResponse, ExtendOptionRequest, OptionTermParams,
    PlaceOptionRequest, ReservationsRequest, TermExpiryRequest,
};
use crate::app_state::AppState;
use crate::domain::ExpirySweepPlan;
use crate::domain::tag_catalog::OptionTermPreset;
use crate::error::{ErrorResponse, WorkbenchError};
use crate::service::workbench_service::{OptionClassification, OptionsOverview};

/// `POST /options/overview`: Options grouped by lifecycle.
#[utoipa::path(
    post,
    path = "/api/v1/options/overview",
    tag = "Options",
    summary = "Option overview",
    description = "Splits option holds into requiring action, active and expired, and adds the option report.",
    request_body = ReservationsRequest,
    responses(
        (status = 200, description = "Overview", body = OptionsOverview),
    )
)]
pub async fn overview(
    State(state): State<AppState>,
    Json(req): Json<ReservationsRequest>,
) -> impl IntoResponse {
    Json(state.workbench.options_overview(&req.reservations))
}

/// `POST /options/classify`: Lifecycle view of one reservation.
#[utoipa::path(
    post,
    path = "/api/v1/options/classify",
    tag = "Options",
    summary = "Classify a reservation",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Classification", body = OptionClassification),
    )
)]
pub async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> impl IntoResponse {
    Json(state.workbench.classify_option(&req.reservation))
}

/// `POST /options/expiry-sweep`: Options to cancel.
#[utoipa::path(
    post,
    path = "/api/v1/options/expiry-sweep",
    tag = "Options",
    summary = "Plan expired-option cancellations",
    description = "Lists option holds whose expiry has passed. Nothing is written; the caller applies the cancellations.",
    request_body = ReservationsRequest,
    responses(
        (status = 200, description = "Cancellation plan", body = ExpirySweepPlan),
    )
)]
pub async fn expiry_sweep(
    State(state): State<AppState>,
    Json(req): Json<ReservationsRequest>,
) -> impl IntoResponse {
    Json(state.workbench.expiry_sweep_plan(&req.reservations))
}

/// `POST /options/expiry`: Expiry for a new option.
///
/// # Errors
///
/// Returns [`WorkbenchError::DateOutOfRange`] when the expiry is not
/// representable.
#[utoipa::path(
    post,
    path = "/api/v1/options/expiry",
    tag = "Options",
    summary = "Compute option expiry",
    description = "Adds the option duration in calendar days to the placement time. Both default: now and the configured term.",
    request_body = PlaceOptionRequest,
    responses(
        (status = 200, description = "Expiry", body = ExpiryResponse),
        (status = 400, description = "Date out of range", body = ErrorResponse),
    )
)]
pub async fn place_option(
    State(state): State<AppState>,
    Json(req): Json<PlaceOptionRequest>,
) -> Result<impl IntoResponse, WorkbenchError> {
    let expires_at = state.workbench.place_option(req.placed_at, req.days)?;
    Ok(Json(ExpiryResponse { expires_at }))
}

/// `POST /options/extend`: Move an option expiry.
///
/// # Errors
///
/// Returns [`WorkbenchError::DateOutOfRange`] when the new expiry is not
/// representable.
#[utoipa::path(
    post,
    path = "/api/v1/options/extend",
    tag = "Options",
    summary = "Extend an option",
    request_body = ExtendOptionRequest,
    responses(
        (status = 200, description = "Extended expiry", body = ExpiryResponse),
        (status = 400, description = "Date out of range", body = ErrorResponse),
    )
)]
pub async fn extend(
    State(state): State<AppState>,
    Json(req): Json<ExtendOptionRequest>,
) -> Result<impl IntoResponse, WorkbenchError> {
    let expires_at = state
        .workbench
        .extend_option(req.current_expiry, req.extra_days)?;
    Ok(Json(ExpiryResponse { expires_at }))
}

/// `GET /option-terms`: Option-term presets.
#[utoipa::path(
    get,
    path = "/api/v1/option-terms",
    tag = "Option terms",
    summary = "List option terms",
    params(OptionTermParams),
    responses(
        (status = 200, description = "Presets", body = Vec<OptionTermPreset>),
    )
)]
pub async fn list_terms(
    State(state): State<AppState>,
    Query(params): Query<OptionTermParams>,
) -> impl IntoResponse {
    Json(state.workbench.option_terms(params.available))
}

/// `GET /option-terms/default`: Default option duration.
#[utoipa::path(
    get,
    path = "/api/v1/option-terms/default",
    tag = "Option terms",
    summary = "Default option duration",
    responses(
        (status = 200, description = "Default duration", body = DefaultTermResponse),
    )
)]
pub async fn default_term(State(state): State<AppState>) -> impl IntoResponse {
    Json(DefaultTermResponse {
        days: state.workbench.default_option_duration_days(),
    })
}

/// `POST /option-terms/{id}/expiry`: Expiry for an option placed now.
///
/// # Errors
///
/// Returns [`WorkbenchError::OptionTermNotFound`] for unknown terms and
/// [`WorkbenchError::InvalidRequest`] for the custom term without a date.
#[utoipa::path(
    post,
    path = "/api/v1/option-terms/{id}/expiry",
    tag = "Option terms",
    summary = "Expiry for a term",
    params(
        ("id" = String, Path, description = "Option-term preset id"),
    ),
    request_body = TermExpiryRequest,
    responses(
        (status = 200, description = "Expiry", body = ExpiryResponse),
        (status = 400, description = "Custom term without date", body = ErrorResponse),
        (status = 404, description = "Unknown term", body = ErrorResponse),
    )
)]
pub async fn term_expiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TermExpiryRequest>,
) -> Result<impl IntoResponse, WorkbenchError> {
    let expires_at = state.workbench.expiry_for_term(&id, req.custom_date)?;
    Ok(Json(ExpiryResponse { expires_at }))
}

/// Option and option-term routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/options/overview", post(overview))
        .route("/options/classify", post(classify))
        .route("/options/expiry-sweep", post(expiry_sweep))
        .route("/options/expiry", post(place_option))
        .route("/options/extend", post(extend))
        .route("/option-terms", get(list_terms))
        .route("/option-terms/default", get(default_term))
        .route("/option-terms/{id}/expiry", post(term_expiry))
}
