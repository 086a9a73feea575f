use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use learnhub_core::error::CoreError;
use learnhub_db::error::DbError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `learnhub-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

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

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => AppError::Core(core),
            DbError::Database(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = classify(&self);

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map an error onto an HTTP status, stable error code, and message.
///
/// Client-caused domain errors map to 4xx; store/infra failures map to 5xx
/// with sanitized messages.
fn classify(err: &AppError) -> (StatusCode, &'static str, String) {
    match err {
        AppError::Core(core) => match core {
            CoreError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            CoreError::InvalidPosition { .. } => (
                StatusCode::BAD_REQUEST,
                "INVALID_POSITION",
                core.to_string(),
            ),
            CoreError::InvalidVideoReference(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_VIDEO_REFERENCE",
                core.to_string(),
            ),
            CoreError::EmptyList => (StatusCode::BAD_REQUEST, "EMPTY_LIST", core.to_string()),
            CoreError::DanglingReference(video_id) => {
                tracing::error!(video_id, "Course ordering references a missing video");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DANGLING_REFERENCE",
                    "Course content is temporarily inconsistent".to_string(),
                )
            }
            CoreError::MetadataResolution(msg) => (
                StatusCode::BAD_REQUEST,
                "METADATA_RESOLUTION",
                msg.clone(),
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

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        classify(&err).0
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: 1,
        });
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn ordering_errors_map_to_400() {
        assert_eq!(
            status_of(AppError::Core(CoreError::InvalidPosition {
                position: 9,
                len: 2
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::InvalidVideoReference(7))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::EmptyList)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn dangling_reference_maps_to_500() {
        assert_eq!(
            status_of(AppError::Core(CoreError::DanglingReference(7))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn metadata_resolution_maps_to_400() {
        assert_eq!(
            status_of(AppError::Core(CoreError::MetadataResolution("no user_id".into()))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn conflict_maps_to_409() {
        assert_eq!(
            status_of(AppError::Core(CoreError::Conflict("stale version".into()))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn row_not_found_maps_to_404() {
        assert_eq!(
            status_of(AppError::Database(sqlx::Error::RowNotFound)),
            StatusCode::NOT_FOUND
        );
    }
}
