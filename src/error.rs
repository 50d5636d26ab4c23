//! Application error taxonomy and HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Errors produced by the core services and their adapters.
///
/// Cache failures are deliberately absent: the resolver treats them as
/// soft failures (logged and counted, never surfaced to callers). See
/// [`crate::infrastructure::cache::CacheError`].
#[derive(Debug, Error)]
pub enum AppError {
    /// No link exists for the requested `(domain, code)`.
    #[error("link not found")]
    NotFound,

    /// The link exists but is inactive or past its expiry.
    /// Presented to HTTP callers as 404.
    #[error("link is not active or has expired")]
    NotUsable,

    /// A unique-key constraint was violated, e.g. a short-code collision.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The durable link store failed on the critical path.
    #[error("storage error: {0}")]
    Persistence(String),

    /// The analytics ledger or daily-counter write failed.
    #[error("aggregation error: {0}")]
    Aggregation(String),

    /// The OS entropy source failed while generating a short code.
    #[error("random source failure: {0}")]
    RandomSource(String),

    /// Short-code generation gave up, e.g. after repeated collisions.
    #[error("code generation failed: {0}")]
    CodeGeneration(String),

    /// Publishing a click event to the log transport failed. The redirect
    /// path logs and swallows this; it never fails a redirect.
    #[error("failed to publish click event: {0}")]
    Delivery(String),

    /// A click event payload could not be encoded or decoded.
    #[error("malformed click event: {0}")]
    Encoding(String),

    /// A stats query asked for a range with `to` before `from`.
    /// Rejected before any I/O.
    #[error("invalid date range: {to} is before {from}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    /// Malformed request input at the HTTP boundary.
    #[error("bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            // Unusable links are indistinguishable from missing ones for callers.
            AppError::NotFound | AppError::NotUsable => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) | AppError::InvalidRange { .. } | AppError::Encoding(_) => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::Persistence(_)
            | AppError::Aggregation(_)
            | AppError::RandomSource(_)
            | AppError::CodeGeneration(_)
            | AppError::Delivery(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error: ErrorInfo { code, message },
        };

        (status, Json(body)).into_response()
    }
}

/// Maps a sqlx error to the application taxonomy.
///
/// Unique-key violations become [`AppError::Conflict`] so the shortener
/// can retry code generation on collision.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::Conflict(db.constraint().unwrap_or("unique constraint").to_string());
        }
    }

    AppError::Persistence(e.to_string())
}
