//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::WorkbenchService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Workbench service for all business logic.
    pub workbench: Arc<WorkbenchService>,
}

impl AppState {
    /// Wraps a service.
    #[must_use]
    pub fn new(workbench: WorkbenchService) -> Self {
        Self {
            workbench: Arc::new(workbench),
        }
    }
}
