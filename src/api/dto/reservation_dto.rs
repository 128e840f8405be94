//! Reservation list and dashboard DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::query_engine::PresetFilter;
use crate::domain::{EventSummary, Reservation, ReservationQuery};

/// Request body for `POST /reservations/query`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationQueryRequest {
    /// Reservations to filter.
    pub reservations: Vec<Reservation>,
    /// Filter criteria; every field defaults to "all".
    #[serde(default)]
    pub query: ReservationQuery,
    /// Preset applied on top of `query`.
    #[serde(default)]
    pub preset: Option<PresetFilter>,
}

/// Request body for `POST /reservations/dashboard`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRequest {
    /// Reservations to summarize.
    pub reservations: Vec<Reservation>,
    /// Events used to resolve event dates in focus items.
    #[serde(default)]
    pub events: Vec<EventSummary>,
}

/// Request body carrying a reservation list.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsRequest {
    /// Reservations to inspect.
    pub reservations: Vec<Reservation>,
}
