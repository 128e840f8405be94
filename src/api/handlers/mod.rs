//! REST endpoint handlers organized by resource.

pub mod options;
pub mod reservations;
pub mod system;
pub mod tags;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(reservations::routes())
        .merge(options::routes())
        .merge(tags::routes())
}
