//! Route definitions for videos and watch history.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::videos;
use crate::state::AppState;

/// Video routes mounted at `/videos`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(videos::list_videos).post(videos::create_video))
        .route("/history", get(videos::get_watch_history))
        .route(
            "/{id}",
            get(videos::get_video)
                .put(videos::update_video)
                .delete(videos::delete_video),
        )
        .route("/{id}/watch", post(videos::update_watch_progress))
}
