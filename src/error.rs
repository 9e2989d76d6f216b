//! Core error types with HTTP status code mapping.
//!
//! [`CoreError`] is the single error type for the wagering core. Each
//! variant is one of the domain error kinds (validation, permission,
//! not-found, invalid-state, persistence) and maps to a specific HTTP
//! status code and structured JSON error response.

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
///     "code": 1001,
///     "message": "stake amount must be at least 1.00",
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
    /// Numeric error code (see code ranges on [`CoreError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error kinds raised by the wagering and settlement core.
///
/// Domain entities and pure services raise the specific kind at the
/// point of violation; the orchestrator never reinterprets them, it
/// only adds transaction boundaries around multi-step sequences.
///
/// # Error Code Ranges
///
/// | Range     | Category      | HTTP Status               |
/// |-----------|---------------|---------------------------|
/// | 1000–1999 | Validation    | 400 Bad Request           |
/// | 2000–2999 | Not Found     | 404 Not Found             |
/// | 3000–3999 | Server        | 500 Internal Server Error |
/// | 4000–4999 | Permission    | 403 Forbidden             |
/// | 5000–5999 | Invalid State | 409 Conflict              |
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed caller input: bad amount, bad outcome list, unknown
    /// action. Never retried.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Authenticated but not authorized for the requested action.
    /// Surfaced distinctly from validation so callers can redirect.
    #[error("not allowed: {0}")]
    Permission(String),

    /// Referenced user or event does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The entity exists but its state does not permit the requested
    /// transition. The message names the required precondition.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Persistence layer failure. Logged in full server-side; shown to
    /// the caller only as a generic failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::NotFound(_) => 2001,
            Self::Persistence(_) => 3001,
            Self::Internal(_) => 3000,
            Self::Permission(_) => 4001,
            Self::InvalidState(_) => 5001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Permission(_) => StatusCode::FORBIDDEN,
            Self::InvalidState(_) => StatusCode::CONFLICT,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Internal failures are masked; the
    /// full detail only goes to the server-side log.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Persistence(_) | Self::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
