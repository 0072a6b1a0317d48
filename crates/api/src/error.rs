use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use fplmate_advice::AdviceError;
use fplmate_core::error::CoreError;
use fplmate_fpl::FplError;

/// Application-level error type for HTTP handlers.
///
/// Wraps domain errors from the core, db, fpl, and advice crates and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent JSON error responses; no upstream failure detail beyond a
/// human-readable message ever reaches the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `fplmate_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An FPL upstream fetch failed outright.
    #[error(transparent)]
    Fpl(#[from] FplError),

    /// The advice pipeline failed (retries exhausted, non-retryable
    /// upstream error, or an empty model reply).
    #[error(transparent)]
    Advice(#[from] AdviceError),

    /// The squad context degraded and the calling feature cannot proceed.
    /// The payload is the rendered sentinel-prefixed context text, which
    /// is returned verbatim as the error message.
    #[error("{0}")]
    ContextDegraded(String),

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
                    format!("{entity} {id} not found"),
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

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- FPL upstream errors ---
            AppError::Fpl(err) => {
                if err.is_not_found() {
                    (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        "Manager not found".to_string(),
                    )
                } else {
                    tracing::error!(error = %err, "FPL upstream error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "UPSTREAM_ERROR",
                        "Failed to fetch FPL data".to_string(),
                    )
                }
            }

            // --- Advice pipeline errors ---
            AppError::Advice(err) => match err {
                // An empty success body is the same 500 for the client but
                // logged under its own event for diagnosis.
                AdviceError::EmptyResponse => {
                    tracing::error!("advice pipeline returned an empty model response");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "EMPTY_MODEL_RESPONSE",
                        err.to_string(),
                    )
                }
                other => {
                    tracing::error!(error = %other, "advice pipeline failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "ADVICE_FAILED",
                        other.to_string(),
                    )
                }
            },

            // --- Degraded squad context ---
            AppError::ContextDegraded(rendered) => {
                tracing::warn!(context = %rendered, "rejecting request with degraded context");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONTEXT_DEGRADED",
                    rendered.clone(),
                )
            }

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
/// - Unique constraint violations (constraint name starting with `uq_`,
///   e.g. a duplicate registration email) map to 409.
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
