//! Route definitions for the admin surface.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes mounted at `/admin`. Every handler enforces the admin role
/// via the `RequireAdmin` extractor.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/stats", get(admin::user_stats))
        .route(
            "/users/{id}",
            put(admin::update_user).delete(admin::delete_user),
        )
        .route("/courses", get(admin::list_all_courses))
        .route("/pricing/{region}", put(admin::upsert_pricing))
}
