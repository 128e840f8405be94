//! Tag catalog DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Reservation;
use crate::domain::reservation::{TagReference, deserialize_tags};
use crate::domain::tag_catalog::TagCategory;
use crate::domain::tagging::BulkTagMode;

/// Query parameters for `GET /tags`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TagListParams {
    /// Only active tags of this category.
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub category: Option<TagCategory>,
}

/// Query parameters for `GET /colors/contrast`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContrastParams {
    /// Background color as hex, with or without `#`.
    pub background: String,
}

/// Response body for `GET /colors/contrast`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResponse {
    /// Background color as given.
    pub background: String,
    /// `#000000` or `#FFFFFF`.
    pub text_color: String,
}

/// Request body for `POST /tags/bulk`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkTagsRequest {
    /// Reservations to edit.
    pub reservations: Vec<Reservation>,
    /// Tags to apply, as ids or `{ id, label }` objects.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<TagReference>,
    /// `add` (default) or `replace`.
    #[serde(default)]
    pub mode: BulkTagMode,
}
