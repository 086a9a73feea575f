//! Route definitions for provider webhooks. Public; authenticity comes from
//! the delivery signature.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Webhook routes mounted at `/webhooks`.
pub fn router() -> Router<AppState> {
    Router::new().route("/stripe", post(webhooks::stripe_webhook))
}
