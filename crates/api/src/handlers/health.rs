//! Liveness/readiness endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub database: &'static str,
}

/// GET /health
///
/// Returns 200 with database status `up`, or 503 when the pool is unusable.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match learnhub_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(Health {
                status: "ok",
                database: "up",
            }),
        ),
        Err(err) => {
            tracing::error!(error = %err, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Health {
                    status: "degraded",
                    database: "down",
                }),
            )
        }
    }
}
