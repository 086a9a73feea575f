//! Route definitions for authentication. All routes are public.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes mounted at `/auth`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/otp/verify", post(auth::verify_otp))
        .route("/password-reset/request", post(auth::request_password_reset))
        .route("/password-reset/confirm", post(auth::confirm_password_reset))
}
