//! Route definitions for presigned upload URLs.

use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Upload-URL routes mounted at `/s3`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-video-url", post(uploads::video_upload_url))
        .route(
            "/generate-thumbnail-url",
            post(uploads::thumbnail_upload_url),
        )
}
