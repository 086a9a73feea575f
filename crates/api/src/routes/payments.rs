//! Route definitions for payments and pricing.

use axum::routing::get;
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Payment routes mounted at `/payments`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(payments::list_payments).post(payments::create_checkout),
        )
        .route("/pricing", get(payments::get_regional_pricing))
        .route("/{id}", get(payments::get_payment))
}
