use std::sync::Arc;

use crate::config::ServerConfig;
use crate::payments::client::StripeClient;
use crate::storage::s3::ObjectStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: learnhub_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Presigned-URL client for the video/thumbnail buckets.
    pub storage: Arc<ObjectStorage>,
    /// Payment provider REST client.
    pub stripe: Arc<StripeClient>,
}
