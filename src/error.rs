//! Service error types with HTTP status code mapping.
//!
//! [`LedgerError`] is the central error type for request handling. Each
//! variant maps to a specific HTTP status code and a flat JSON error body.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Message returned when a delete lookup finds no live record.
pub const RECORD_NOT_FOUND_MESSAGE: &str = "Record not found!";

/// Message returned for store failures. Details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// { "error": "Record not found!" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant          | HTTP Status               |
/// |------------------|---------------------------|
/// | `InvalidBody`    | 400 Bad Request           |
/// | `RecordNotFound` | 404 Not Found             |
/// | `Persistence`    | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Request body could not be bound to the expected shape.
    #[error("{0}")]
    InvalidBody(String),

    /// No live record matches the requested user and id.
    #[error("Record not found!")]
    RecordNotFound,

    /// The record store failed.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl LedgerError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::RecordNotFound => StatusCode::NOT_FOUND,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message exposed to clients.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidBody(msg) => msg.clone(),
            Self::RecordNotFound => RECORD_NOT_FOUND_MESSAGE.to_string(),
            Self::Persistence(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<JsonRejection> for LedgerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        if let Self::Persistence(detail) = &self {
            tracing::error!(error = %detail, "record store failure");
        }
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, axum::Json(body)).into_response()
    }
}
