//! Route definitions for courses and playback-order maintenance.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Course routes mounted at `/courses`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list_courses).post(courses::create_course))
        .route(
            "/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/{id}/videos", post(courses::add_video_to_course))
        .route(
            "/{id}/videos/{video_id}",
            delete(courses::remove_video_from_course),
        )
        .route("/{id}/reorder", post(courses::reorder_videos))
}
