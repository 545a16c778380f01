//! Service error types with HTTP status code mapping.
//!
//! [`ServiceError`] is the central error type. The lifecycle taxonomy is
//! deliberately small: `NotFound` and `InvalidStatus` are the only business
//! failures; everything the document store throws is folded into
//! `Persistence` so store-specific errors never leak past the store
//! interface. Each variant maps to a specific HTTP status code and a
//! structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{NotificationId, NotificationStatus};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "notification not found: ...",
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
    /// Numeric error code (see code ranges on [`ServiceError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status                |
/// |-----------|---------------------|----------------------------|
/// | 1000–1999 | Validation          | 400 Bad Request            |
/// | 2000–2999 | Lifecycle/Not Found | 404 / 400 / 409            |
/// | 3000–3999 | Server              | 500 Internal Server Error  |
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No notification with the given identity exists.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// The operation is not permitted from the notification's current status.
    #[error("notification {id} has status '{current}', expected '{expected}'")]
    InvalidStatus {
        /// Identity the operation was aimed at.
        id: NotificationId,
        /// Status the notification actually has.
        current: NotificationStatus,
        /// Status the operation requires.
        expected: NotificationStatus,
    },

    /// A concurrent writer modified the notification between load and save.
    /// Safe to retry.
    #[error("concurrent modification of notification {0}, retry the operation")]
    Conflict(NotificationId),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Document store failure (I/O, serialization).
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::NotFound(_) => 2001,
            Self::InvalidStatus { .. } => 2002,
            Self::Conflict(_) => 2003,
            Self::Persistence(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    ///
    /// `InvalidStatus` is a client/business-rule error, not a server fault,
    /// so it maps to 400 rather than 409.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidStatus { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ServiceError::NotFound(NotificationId::new());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
    }

    #[test]
    fn invalid_status_maps_to_400() {
        let err = ServiceError::InvalidStatus {
            id: NotificationId::new(),
            current: NotificationStatus::Draft,
            expected: NotificationStatus::Published,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 2002);
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = ServiceError::Conflict(NotificationId::new());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_status_message_carries_both_statuses() {
        let err = ServiceError::InvalidStatus {
            id: NotificationId::new(),
            current: NotificationStatus::Unpublished,
            expected: NotificationStatus::Draft,
        };
        let msg = err.to_string();
        assert!(msg.contains("Unpublished"));
        assert!(msg.contains("Draft"));
    }

    #[test]
    fn persistence_maps_to_500() {
        let err = ServiceError::Persistence("connection reset".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
