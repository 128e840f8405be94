//! Workbench error types with HTTP status code mapping.
//!
//! [`WorkbenchError`] is the central error type for the workbench. Domain
//! classification never produces one; errors only come from date
//! arithmetic overflow, catalog lookups, and rejected requests. Each
//! variant maps to a specific HTTP status code and structured JSON error
//! response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "tag not found: VIP",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Workbench error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                         |
/// |-----------|-----------------|-------------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request                     |
/// | 2000–2999 | Catalog         | 404 Not Found / 405 Not Allowed     |
/// | 3000–3999 | Server          | 500 Internal Server Error           |
#[derive(Debug, thiserror::Error)]
pub enum WorkbenchError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Calendar arithmetic left the representable date range.
    #[error("date out of range: {0}")]
    DateOutOfRange(String),

    /// Tag with the given ID is not in the catalog.
    #[error("tag not found: {0}")]
    TagNotFound(String),

    /// Option term preset with the given ID does not exist.
    #[error("option term not found: {0}")]
    OptionTermNotFound(String),

    /// The tag catalog cannot be modified through this service.
    #[error("tag catalog is read-only; changes to {0} were not saved")]
    CatalogReadOnly(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WorkbenchError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::DateOutOfRange(_) => 1002,
            Self::TagNotFound(_) => 2001,
            Self::OptionTermNotFound(_) => 2002,
            Self::CatalogReadOnly(_) => 2003,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::DateOutOfRange(_) => StatusCode::BAD_REQUEST,
            Self::TagNotFound(_) | Self::OptionTermNotFound(_) => StatusCode::NOT_FOUND,
            Self::CatalogReadOnly(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WorkbenchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            Self::CatalogReadOnly(_) => {
                Some("tag catalogs are served from built-in defaults".to_string())
            }
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_ranges() {
        assert_eq!(
            WorkbenchError::InvalidRequest(String::new()).error_code(),
            1001
        );
        assert_eq!(WorkbenchError::TagNotFound("VIP".into()).error_code(), 2001);
        assert_eq!(WorkbenchError::Internal(String::new()).error_code(), 3000);
    }

    #[test]
    fn read_only_catalog_maps_to_method_not_allowed() {
        let err = WorkbenchError::CatalogReadOnly("VIP".into());
        assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(err.to_string().contains("not saved"));
    }

    #[test]
    fn into_response_sets_status() {
        let response = WorkbenchError::OptionTermNotFound("5days".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
