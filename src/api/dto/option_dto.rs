//! Option lifecycle and option-term DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Reservation, Thresholds};

/// Request body for `POST /options/classify`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    /// Reservation to classify.
    pub reservation: Reservation,
}

/// Request body for `POST /options/expiry`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOptionRequest {
    /// Placement time; defaults to now.
    #[serde(default)]
    pub placed_at: Option<DateTime<Utc>>,
    /// Option duration; defaults to the configured term.
    #[serde(default)]
    pub days: Option<u32>,
}

/// Request body for `POST /options/extend`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtendOptionRequest {
    /// Expiry to move.
    pub current_expiry: DateTime<Utc>,
    /// Calendar days to add; negative values shorten the option.
    pub extra_days: i64,
}

/// Request body for `POST /option-terms/{id}/expiry`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TermExpiryRequest {
    /// Explicit expiry, required for the `custom` term.
    #[serde(default)]
    pub custom_date: Option<DateTime<Utc>>,
}

/// Computed option expiry.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryResponse {
    /// The new expiry.
    pub expires_at: DateTime<Utc>,
}

/// Query parameters for `GET /option-terms`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OptionTermParams {
    /// Only presets with a fixed day count.
    #[serde(default)]
    pub available: bool,
}

/// Response body for `GET /option-terms/default`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DefaultTermResponse {
    /// Default option duration in days.
    pub days: u32,
}

/// Response body for `GET /config/thresholds`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdsResponse {
    /// Thresholds in effect.
    pub thresholds: Thresholds,
    /// Effective default option duration in days.
    pub default_option_term_days: u32,
}
