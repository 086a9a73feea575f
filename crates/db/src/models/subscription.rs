//! Subscription entity model and DTOs.

use learnhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subscriptions` table.
///
/// One row per user (unique on `user_id`); provider webhook events reconcile
/// into it, keyed by the user resolved from customer metadata. Cancellation
/// is a status transition -- rows are never deleted by the billing flow.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub user_id: DbId,
    pub product_id: Option<DbId>,
    /// Provider status string stored verbatim (`active`, `trialing`,
    /// `past_due`, ...). Entitlement checks whitelist `active`/`trial`.
    pub status: String,
    pub plan: Option<String>,
    pub currency: Option<String>,
    pub amount: Option<i64>,
    pub current_period_start: Option<Timestamp>,
    pub current_period_end: Option<Timestamp>,
    pub cancel_at_period_end: bool,
    pub canceled_at: Option<Timestamp>,
    pub payment_method_id: Option<String>,
    pub customer_id: Option<String>,
    /// Provider-side subscription identifier, stored pass-through.
    pub subscription_id: Option<String>,
    pub last_payment_status: Option<String>,
    pub last_payment_date: Option<Timestamp>,
    pub auto_renew: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a subscription directly (checkout-independent path).
#[derive(Debug)]
pub struct CreateSubscription {
    pub user_id: DbId,
    pub product_id: Option<DbId>,
    pub status: String,
    pub plan: Option<String>,
    pub currency: Option<String>,
    pub amount: Option<i64>,
    pub payment_method_id: Option<String>,
    pub auto_renew: bool,
}

/// Request body for updating the payment method on a subscription.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentMethod {
    pub payment_method_id: String,
}
