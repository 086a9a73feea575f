//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?page=&limit=`).
///
/// Values are clamped via `learnhub_core::pagination` before hitting the
/// repository layer.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
