use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vinoteca_cellar::CellarError;
use vinoteca_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`CellarError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// JSON error responses with machine-checkable codes (`SLOT_OCCUPIED`,
/// `NOT_PLACED`, ...).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vinoteca_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A placement-subsystem error from `vinoteca_cellar`.
    #[error(transparent)]
    Cellar(#[from] CellarError),

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
            AppError::Core(core) => classify_core_error(core),
            AppError::Cellar(cellar) => classify_cellar_error(cellar),
            AppError::Database(err) => classify_sqlx_error(err),
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

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Placement outcomes carry exact sentinel codes: calling code (and the SPA)
/// branches on `SLOT_OCCUPIED` and `NOT_PLACED`.
fn classify_cellar_error(err: &CellarError) -> (StatusCode, &'static str, String) {
    match err {
        CellarError::SlotOccupied(reason) => {
            (StatusCode::CONFLICT, "SLOT_OCCUPIED", reason.clone())
        }
        CellarError::NotPlaced(wine_id) => (
            StatusCode::NOT_FOUND,
            "NOT_PLACED",
            format!("Wine {wine_id} is not placed in any slot"),
        ),
        CellarError::NothingToUndo => (
            StatusCode::CONFLICT,
            "NOTHING_TO_UNDO",
            "No changes to undo".to_string(),
        ),
        CellarError::NoGhost(msg) => (StatusCode::CONFLICT, "NO_GHOST", msg.clone()),
        CellarError::Core(core) => classify_core_error(core),
        CellarError::Database(db) => classify_sqlx_error(db),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - A `uq_slot_position` violation is the constraint backstop behind the
///   advisory collision check and maps to `SLOT_OCCUPIED`.
/// - Other unique violations (constraint name starting with `uq_`) map to 409.
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
                if constraint == "uq_slot_position" {
                    return (
                        StatusCode::CONFLICT,
                        "SLOT_OCCUPIED",
                        "Slot is already occupied".to_string(),
                    );
                }
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
