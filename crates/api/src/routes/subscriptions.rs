//! Route definitions for subscriptions.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::subscriptions;
use crate::state::AppState;

/// Subscription routes mounted at `/subscriptions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(subscriptions::list_subscriptions).post(subscriptions::create_subscription),
        )
        .route("/{id}", get(subscriptions::get_subscription))
        .route("/{id}/cancel", post(subscriptions::cancel_subscription))
        .route(
            "/{id}/reactivate",
            post(subscriptions::reactivate_subscription),
        )
        .route(
            "/{id}/payment-method",
            put(subscriptions::update_payment_method),
        )
}
