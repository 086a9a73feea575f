//! Route definitions for the caller's own profile.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(users::get_me).put(users::update_me))
}
