//! Tag catalog, color and bulk-tagging handlers.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    BulkTagsRequest, ContrastParams, ContrastResponse, ReservationsRequest, TagListParams,
};
use crate::app_state::AppState;
use crate::domain::tag_catalog::{TagCatalog, TagDefinition, contrast_text_color};
use crate::error::{ErrorResponse, WorkbenchError};
use crate::service::workbench_service::{BulkTagResult, MigrationPreview};

/// Copy of `tag` with its text color filled in.
fn with_text_color(catalog: &TagCatalog, tag: &TagDefinition) -> TagDefinition {
    TagDefinition {
        text_color: Some(catalog.resolve_text_color(tag).to_string()),
        ..tag.clone()
    }
}

/// `GET /tags`: Tag catalog.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    tag = "Tags",
    summary = "List tags",
    description = "Returns every tag, or only the active tags of one category. Text colors are always filled in.",
    params(TagListParams),
    responses(
        (status = 200, description = "Tags", body = Vec<TagDefinition>),
    )
)]
pub async fn list_tags(
    State(state): State<AppState>,
    Query(params): Query<TagListParams>,
) -> impl IntoResponse {
    let catalog = state.workbench.catalog();
    let tags: Vec<TagDefinition> = match params.category {
        Some(category) => catalog
            .tags_by_category(category)
            .into_iter()
            .map(|t| with_text_color(catalog, t))
            .collect(),
        None => catalog
            .tags()
            .iter()
            .map(|t| with_text_color(catalog, t))
            .collect(),
    };
    Json(tags)
}

/// `GET /tags/quick-pick`: Tags offered for one-click selection.
#[utoipa::path(
    get,
    path = "/api/v1/tags/quick-pick",
    tag = "Tags",
    summary = "Quick-pick tags",
    responses(
        (status = 200, description = "Default active tags", body = Vec<TagDefinition>),
    )
)]
pub async fn quick_pick(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.workbench.catalog();
    let tags: Vec<TagDefinition> = catalog
        .default_quick_pick_tags()
        .into_iter()
        .map(|t| with_text_color(catalog, t))
        .collect();
    Json(tags)
}

/// `GET /tags/{id}`: One tag.
///
/// # Errors
///
/// Returns [`WorkbenchError::TagNotFound`] for unknown ids.
#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    tag = "Tags",
    summary = "Get a tag",
    params(
        ("id" = String, Path, description = "Tag id"),
    ),
    responses(
        (status = 200, description = "Tag", body = TagDefinition),
        (status = 404, description = "Tag not found", body = ErrorResponse),
    )
)]
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, WorkbenchError> {
    let tag = state.workbench.tag(&id)?;
    Ok(Json(with_text_color(state.workbench.catalog(), tag)))
}

/// `PUT /tags/{id}`: Always refused.
///
/// # Errors
///
/// Always returns [`WorkbenchError::CatalogReadOnly`].
#[utoipa::path(
    put,
    path = "/api/v1/tags/{id}",
    tag = "Tags",
    summary = "Update a tag (not supported)",
    description = "The catalog is built in. Writes are refused instead of being silently dropped.",
    params(
        ("id" = String, Path, description = "Tag id"),
    ),
    responses(
        (status = 405, description = "Catalog is read-only", body = ErrorResponse),
    )
)]
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TagDefinition>, WorkbenchError> {
    Err(state.workbench.reject_tag_update(&id))
}

/// `GET /colors/contrast`: Readable text color for a background.
#[utoipa::path(
    get,
    path = "/api/v1/colors/contrast",
    tag = "Tags",
    summary = "Contrast text color",
    params(ContrastParams),
    responses(
        (status = 200, description = "Text color", body = ContrastResponse),
    )
)]
pub async fn contrast(Query(params): Query<ContrastParams>) -> impl IntoResponse {
    let text_color = contrast_text_color(&params.background).to_string();
    Json(ContrastResponse {
        background: params.background,
        text_color,
    })
}

/// `POST /tags/bulk`: Preview of a bulk tag edit.
///
/// # Errors
///
/// Returns [`WorkbenchError::TagNotFound`] when a tag is not in the catalog.
#[utoipa::path(
    post,
    path = "/api/v1/tags/bulk",
    tag = "Tags",
    summary = "Bulk tag edit",
    request_body = BulkTagsRequest,
    responses(
        (status = 200, description = "Resulting tags per reservation", body = Vec<BulkTagResult>),
        (status = 404, description = "Unknown tag", body = ErrorResponse),
    )
)]
pub async fn bulk_tags(
    State(state): State<AppState>,
    Json(req): Json<BulkTagsRequest>,
) -> Result<impl IntoResponse, WorkbenchError> {
    let results = state
        .workbench
        .bulk_tags(&req.reservations, &req.tags, req.mode)?;
    Ok(Json(results))
}

/// `POST /tags/migration-preview`: Automatic-tag reconciliation.
#[utoipa::path(
    post,
    path = "/api/v1/tags/migration-preview",
    tag = "Tags",
    summary = "Preview automatic-tag migration",
    request_body = ReservationsRequest,
    responses(
        (status = 200, description = "Reservations whose tags are out of date", body = MigrationPreview),
    )
)]
pub async fn migration_preview(
    State(state): State<AppState>,
    Json(req): Json<ReservationsRequest>,
) -> impl IntoResponse {
    Json(state.workbench.tag_migration_preview(&req.reservations))
}

/// Tag and color routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags))
        .route("/tags/quick-pick", get(quick_pick))
        .route("/tags/bulk", post(bulk_tags))
        .route("/tags/migration-preview", post(migration_preview))
        .route("/tags/{id}", get(get_tag).put(update_tag))
        .route("/colors/contrast", get(contrast))
}
