//! Payment-provider webhook endpoint.
//!
//! Verifies the delivery signature against the raw body, then applies the
//! event: completed checkouts append to the payment ledger, subscription
//! lifecycle events reconcile into the user's subscription row. Unrecognized
//! event types are acknowledged so the provider stops redelivering them.
//!
//! There is no delivery dedup: replaying a subscription event converges
//! (field overwrite), replaying a checkout event appends a second ledger row.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use learnhub_core::billing;
use learnhub_db::repositories::{PaymentRepo, SubscriptionRepo};

use crate::error::{AppError, AppResult};
use crate::payments::webhook::verify_signature;
use crate::state::AppState;

/// POST /api/v1/webhooks/stripe
///
/// Public endpoint; authenticity comes from the signature, not a bearer
/// token.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let secret = &state.config.stripe.webhook_secret;
    if secret.is_empty() {
        tracing::error!("Webhook received but no signing secret is configured");
        return Err(AppError::InternalError(
            "Webhook configuration is missing".into(),
        ));
    }

    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing Stripe-Signature header".into()))?;

    verify_signature(&body, signature, secret)
        .map_err(|_| AppError::BadRequest("Invalid webhook signature".into()))?;

    let event = billing::parse_event(&body)?;

    match event.event_type.as_str() {
        billing::EVENT_CHECKOUT_COMPLETED => {
            let session = billing::checkout_session(&event)?;
            let draft = billing::payment_from_checkout(&session)?;
            let payment = PaymentRepo::create(&state.pool, &draft).await?;

            tracing::info!(
                payment_id = payment.id,
                user_id = draft.user_id,
                transaction_id = %draft.transaction_id,
                amount = draft.amount,
                "Checkout payment recorded",
            );
        }

        billing::EVENT_SUBSCRIPTION_UPDATED => {
            let sub = billing::subscription_object(&event)?;
            let patch = billing::subscription_patch(&sub)?;
            let updated = SubscriptionRepo::upsert_reconciled(&state.pool, &patch).await?;

            tracing::info!(
                subscription_id = updated.id,
                user_id = patch.user_id,
                status = %patch.status,
                "Subscription reconciled",
            );
        }

        billing::EVENT_SUBSCRIPTION_DELETED => {
            let sub = billing::subscription_object(&event)?;
            let patch = billing::cancellation_patch(&sub)?;
            let updated = SubscriptionRepo::upsert_reconciled(&state.pool, &patch).await?;

            tracing::info!(
                subscription_id = updated.id,
                user_id = patch.user_id,
                "Subscription canceled by provider",
            );
        }

        other => {
            tracing::debug!(event_type = %other, event_id = %event.id, "Ignoring webhook event");
        }
    }

    Ok(StatusCode::OK)
}
