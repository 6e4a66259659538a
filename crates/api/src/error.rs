use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use leadflow_core::assignment::AssignmentError;
use leadflow_core::error::CoreError;
use leadflow_core::sweep::SweepError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for cross-cutting domain errors, the assignment and
/// sweep taxonomies for engine failures, and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `leadflow_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rejected lead assignment. The lead was not created.
    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    /// A refused idle-lead sweep. No leads were moved.
    #[error(transparent)]
    Sweep(#[from] SweepError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Assignment rejections ---
            // A duplicate is a conflict with existing data; the rest mean the
            // request was well-formed but cannot be satisfied right now.
            AppError::Assignment(err) => match err {
                AssignmentError::DuplicatePhone(_) => {
                    (StatusCode::CONFLICT, "DUPLICATE_PHONE", err.to_string())
                }
                AssignmentError::SpecialistOffline { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "SPECIALIST_OFFLINE",
                    err.to_string(),
                ),
                AssignmentError::NoAvailableAgent => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "NO_AVAILABLE_AGENT",
                    err.to_string(),
                ),
                AssignmentError::UnknownAssignee(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNKNOWN_ASSIGNEE",
                    err.to_string(),
                ),
            },

            // --- Sweep rejections ---
            AppError::Sweep(err @ SweepError::InsufficientAgents { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INSUFFICIENT_AGENTS",
                err.to_string(),
            ),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
