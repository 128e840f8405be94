//! OpenAPI document for the REST API.

use utoipa::OpenApi;

use crate::api::handlers::{options, reservations, system, tags};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "theater-workbench",
        description = "Reservation workbench: option lifecycle, tag catalog and reservation queries."
    ),
    paths(
        system::health_handler,
        system::thresholds_handler,
        reservations::query_reservations,
        reservations::dashboard,
        options::overview,
        options::classify,
        options::expiry_sweep,
        options::place_option,
        options::extend,
        options::list_terms,
        options::default_term,
        options::term_expiry,
        tags::list_tags,
        tags::quick_pick,
        tags::get_tag,
        tags::update_tag,
        tags::contrast,
        tags::bulk_tags,
        tags::migration_preview,
    ),
    components(schemas(ErrorResponse, ErrorBody)),
    tags(
        (name = "System", description = "Health and configuration"),
        (name = "Reservations", description = "Workbench list and dashboard"),
        (name = "Options", description = "Option-hold lifecycle"),
        (name = "Option terms", description = "Option duration presets"),
        (name = "Tags", description = "Tag catalog and tagging"),
    )
)]
pub struct ApiDoc;
