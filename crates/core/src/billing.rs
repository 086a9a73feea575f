//! Payment-provider event reconciliation.
//!
//! The webhook endpoint verifies event authenticity and hands the raw JSON
//! here. This module parses the provider payload into typed objects and
//! computes the resulting state: a payment ledger draft for completed
//! checkouts, or a subscription field patch for subscription lifecycle
//! events. Every patch is a full overwrite of the same field set, so
//! replaying an event converges on the same stored state.

use std::collections::HashMap;

use chrono::DateTime;
use serde::Deserialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Event kinds and well-known tokens
// ---------------------------------------------------------------------------

/// A checkout flow finished and was paid.
pub const EVENT_CHECKOUT_COMPLETED: &str = "checkout.session.completed";

/// The provider-side subscription changed (renewal, plan change, pause...).
pub const EVENT_SUBSCRIPTION_UPDATED: &str = "customer.subscription.updated";

/// The provider-side subscription ended.
pub const EVENT_SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";

pub const GATEWAY_STRIPE: &str = "stripe";

pub const SUBSCRIPTION_ACTIVE: &str = "active";
pub const SUBSCRIPTION_TRIAL: &str = "trial";
pub const SUBSCRIPTION_CANCELED: &str = "canceled";
pub const SUBSCRIPTION_EXPIRED: &str = "expired";

pub const PAYMENT_COMPLETED: &str = "completed";

// ---------------------------------------------------------------------------
// Provider payload types
// ---------------------------------------------------------------------------

/// Envelope of a provider webhook event. `data.object` stays untyped until
/// the event kind selects a concrete object shape.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub object: serde_json::Value,
}

/// Customer embedded in an event, expanded so its metadata travels with the
/// payload. The `user_id` entry links the provider customer back to a user.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerObject {
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// The subset of a checkout-session object this platform consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    pub id: String,
    pub amount_total: i64,
    pub currency: String,
    pub customer: CustomerObject,
}

/// The subset of a provider subscription object this platform consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionObject {
    #[serde(default)]
    pub id: Option<String>,
    pub status: String,
    pub current_period_end: i64,
    #[serde(default)]
    pub cancel_at_period_end: bool,
    pub customer: CustomerObject,
    #[serde(default)]
    pub items: SubscriptionItemList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionItemList {
    #[serde(default)]
    pub data: Vec<SubscriptionItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionItem {
    pub price: PriceObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceObject {
    #[serde(default)]
    pub recurring: Option<RecurringPrice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecurringPrice {
    pub interval: String,
}

// ---------------------------------------------------------------------------
// Computed state
// ---------------------------------------------------------------------------

/// Ledger entry to insert for a completed checkout. Payments are immutable
/// once written; there is no update path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDraft {
    pub user_id: DbId,
    pub gateway: String,
    pub transaction_id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

/// Full overwrite of the reconciled subscription fields, keyed by user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionPatch {
    pub user_id: DbId,
    pub status: String,
    /// Billing interval of the first subscription item, when present.
    pub plan: Option<String>,
    pub current_period_end: Timestamp,
    pub cancel_at_period_end: bool,
    /// Provider-side subscription identifier, stored pass-through.
    pub subscription_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse the raw webhook body into an event envelope.
pub fn parse_event(payload: &[u8]) -> Result<WebhookEvent, CoreError> {
    serde_json::from_slice(payload)
        .map_err(|e| CoreError::Validation(format!("Malformed webhook payload: {e}")))
}

/// Deserialize the event's object as a checkout session.
pub fn checkout_session(event: &WebhookEvent) -> Result<CheckoutSessionObject, CoreError> {
    serde_json::from_value(event.data.object.clone())
        .map_err(|e| CoreError::Validation(format!("Malformed checkout session: {e}")))
}

/// Deserialize the event's object as a provider subscription.
pub fn subscription_object(event: &WebhookEvent) -> Result<SubscriptionObject, CoreError> {
    serde_json::from_value(event.data.object.clone())
        .map_err(|e| CoreError::Validation(format!("Malformed subscription object: {e}")))
}

/// Resolve the platform user id from customer metadata.
///
/// A missing or non-numeric `user_id` entry rejects the whole event; redelivery
/// is the provider's responsibility.
pub fn resolve_user_id(customer: &CustomerObject) -> Result<DbId, CoreError> {
    let raw = customer
        .metadata
        .get("user_id")
        .ok_or_else(|| CoreError::MetadataResolution("customer metadata has no user_id".into()))?;

    raw.parse::<DbId>().map_err(|_| {
        CoreError::MetadataResolution(format!("customer metadata user_id '{raw}' is not a valid id"))
    })
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Build the payment ledger draft for a completed checkout session.
pub fn payment_from_checkout(session: &CheckoutSessionObject) -> Result<PaymentDraft, CoreError> {
    let user_id = resolve_user_id(&session.customer)?;

    Ok(PaymentDraft {
        user_id,
        gateway: GATEWAY_STRIPE.to_string(),
        transaction_id: session.id.clone(),
        amount: session.amount_total,
        currency: session.currency.clone(),
        status: PAYMENT_COMPLETED.to_string(),
    })
}

/// Build the subscription patch for a `customer.subscription.updated` event.
///
/// The provider's status string is stored verbatim; the entitlement query
/// (`SubscriptionRepo::find_active`) decides which statuses grant access.
pub fn subscription_patch(sub: &SubscriptionObject) -> Result<SubscriptionPatch, CoreError> {
    let user_id = resolve_user_id(&sub.customer)?;
    let current_period_end = period_end(sub.current_period_end)?;

    Ok(SubscriptionPatch {
        user_id,
        status: sub.status.clone(),
        plan: first_interval(sub),
        current_period_end,
        cancel_at_period_end: sub.cancel_at_period_end,
        subscription_id: sub.id.clone(),
    })
}

/// Build the subscription patch for a `customer.subscription.deleted` event:
/// the same field set, with the status forced to canceled.
pub fn cancellation_patch(sub: &SubscriptionObject) -> Result<SubscriptionPatch, CoreError> {
    let mut patch = subscription_patch(sub)?;
    patch.status = SUBSCRIPTION_CANCELED.to_string();
    Ok(patch)
}

/// Billing interval of the first subscription item, e.g. `"month"`/`"year"`.
fn first_interval(sub: &SubscriptionObject) -> Option<String> {
    sub.items
        .data
        .first()
        .and_then(|item| item.price.recurring.as_ref())
        .map(|r| r.interval.clone())
}

fn period_end(unix_secs: i64) -> Result<Timestamp, CoreError> {
    DateTime::from_timestamp(unix_secs, 0).ok_or_else(|| {
        CoreError::Validation(format!("current_period_end {unix_secs} is out of range"))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout_event(user_id: &str) -> WebhookEvent {
        parse_event(
            format!(
                r#"{{
                    "id": "evt_1",
                    "type": "checkout.session.completed",
                    "data": {{
                        "object": {{
                            "id": "cs_test_123",
                            "amount_total": 1999,
                            "currency": "usd",
                            "customer": {{ "metadata": {{ "user_id": "{user_id}" }} }}
                        }}
                    }}
                }}"#
            )
            .as_bytes(),
        )
        .unwrap()
    }

    fn subscription_event(status: &str) -> WebhookEvent {
        parse_event(
            format!(
                r#"{{
                    "id": "evt_2",
                    "type": "customer.subscription.updated",
                    "data": {{
                        "object": {{
                            "id": "sub_42",
                            "status": "{status}",
                            "current_period_end": 1767225600,
                            "cancel_at_period_end": true,
                            "customer": {{ "metadata": {{ "user_id": "7" }} }},
                            "items": {{
                                "data": [
                                    {{ "price": {{ "recurring": {{ "interval": "month" }} }} }}
                                ]
                            }}
                        }}
                    }}
                }}"#
            )
            .as_bytes(),
        )
        .unwrap()
    }

    // -- parsing -------------------------------------------------------------

    #[test]
    fn parse_event_reads_envelope() {
        let event = checkout_event("7");
        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, EVENT_CHECKOUT_COMPLETED);
    }

    #[test]
    fn parse_event_rejects_malformed_json() {
        assert!(matches!(
            parse_event(b"{not json").unwrap_err(),
            CoreError::Validation(_)
        ));
    }

    #[test]
    fn checkout_session_rejects_wrong_object_shape() {
        let event = parse_event(
            br#"{"id": "evt", "type": "checkout.session.completed", "data": {"object": {"id": 1}}}"#,
        )
        .unwrap();
        assert!(checkout_session(&event).is_err());
    }

    // -- user id resolution --------------------------------------------------

    #[test]
    fn resolve_user_id_reads_metadata() {
        let session = checkout_session(&checkout_event("42")).unwrap();
        assert_eq!(resolve_user_id(&session.customer).unwrap(), 42);
    }

    #[test]
    fn resolve_user_id_fails_on_missing_entry() {
        let customer = CustomerObject {
            metadata: HashMap::new(),
        };
        assert!(matches!(
            resolve_user_id(&customer).unwrap_err(),
            CoreError::MetadataResolution(_)
        ));
    }

    #[test]
    fn resolve_user_id_fails_on_non_numeric_entry() {
        let session = checkout_session(&checkout_event("not-a-number")).unwrap();
        assert!(matches!(
            resolve_user_id(&session.customer).unwrap_err(),
            CoreError::MetadataResolution(_)
        ));
    }

    // -- checkout -> payment -------------------------------------------------

    #[test]
    fn payment_draft_copies_session_fields() {
        let session = checkout_session(&checkout_event("7")).unwrap();
        let draft = payment_from_checkout(&session).unwrap();

        assert_eq!(
            draft,
            PaymentDraft {
                user_id: 7,
                gateway: GATEWAY_STRIPE.to_string(),
                transaction_id: "cs_test_123".to_string(),
                amount: 1999,
                currency: "usd".to_string(),
                status: PAYMENT_COMPLETED.to_string(),
            }
        );
    }

    // -- subscription patches ------------------------------------------------

    #[test]
    fn update_patch_carries_provider_fields_verbatim() {
        let sub = subscription_object(&subscription_event("past_due")).unwrap();
        let patch = subscription_patch(&sub).unwrap();

        assert_eq!(patch.user_id, 7);
        assert_eq!(patch.status, "past_due");
        assert_eq!(patch.plan.as_deref(), Some("month"));
        assert_eq!(patch.current_period_end.timestamp(), 1_767_225_600);
        assert!(patch.cancel_at_period_end);
        assert_eq!(patch.subscription_id.as_deref(), Some("sub_42"));
    }

    #[test]
    fn update_patch_is_idempotent() {
        let sub = subscription_object(&subscription_event("active")).unwrap();
        assert_eq!(
            subscription_patch(&sub).unwrap(),
            subscription_patch(&sub).unwrap()
        );
    }

    #[test]
    fn deletion_patch_forces_canceled_status() {
        let sub = subscription_object(&subscription_event("active")).unwrap();
        let patch = cancellation_patch(&sub).unwrap();

        assert_eq!(patch.status, SUBSCRIPTION_CANCELED);
        // Everything else is still refreshed from the payload.
        assert_eq!(patch.plan.as_deref(), Some("month"));
        assert_eq!(patch.current_period_end.timestamp(), 1_767_225_600);
    }

    #[test]
    fn patch_without_items_has_no_plan() {
        let event = parse_event(
            br#"{
                "id": "evt_3",
                "type": "customer.subscription.updated",
                "data": {
                    "object": {
                        "status": "active",
                        "current_period_end": 1767225600,
                        "customer": { "metadata": { "user_id": "7" } }
                    }
                }
            }"#,
        )
        .unwrap();
        let sub = subscription_object(&event).unwrap();
        let patch = subscription_patch(&sub).unwrap();

        assert_eq!(patch.plan, None);
        assert_eq!(patch.subscription_id, None);
        assert!(!patch.cancel_at_period_end);
    }

    #[test]
    fn patch_fails_without_user_metadata() {
        let event = parse_event(
            br#"{
                "id": "evt_4",
                "type": "customer.subscription.updated",
                "data": {
                    "object": {
                        "status": "active",
                        "current_period_end": 1767225600,
                        "customer": { "metadata": {} }
                    }
                }
            }"#,
        )
        .unwrap();
        let sub = subscription_object(&event).unwrap();
        assert!(matches!(
            subscription_patch(&sub).unwrap_err(),
            CoreError::MetadataResolution(_)
        ));
    }
}
