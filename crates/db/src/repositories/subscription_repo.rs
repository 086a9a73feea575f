//! Repository for the `subscriptions` table.

use learnhub_core::billing::SubscriptionPatch;
use learnhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscription::{CreateSubscription, Subscription};

const SUBSCRIPTION_COLUMNS: &str = "\
    id, user_id, product_id, status, plan, currency, amount, \
    current_period_start, current_period_end, cancel_at_period_end, canceled_at, \
    payment_method_id, customer_id, subscription_id, last_payment_status, \
    last_payment_date, auto_renew, created_at, updated_at";

/// Provides CRUD and reconciliation operations for subscriptions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Create a subscription row directly (non-webhook path).
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscription,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions \
                 (user_id, product_id, status, plan, currency, amount, \
                  payment_method_id, auto_renew) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(input.user_id)
            .bind(input.product_id)
            .bind(&input.status)
            .bind(input.plan.as_deref())
            .bind(input.currency.as_deref())
            .bind(input.amount)
            .bind(input.payment_method_id.as_deref())
            .bind(input.auto_renew)
            .fetch_one(pool)
            .await
    }

    /// Find a subscription by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = $1");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's subscriptions, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Subscription count for a user.
    pub async fn count_by_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM subscriptions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// The subscription currently granting a user entitlement, if any.
    ///
    /// Entitled means status `active` or `trial` with an unexpired period.
    pub async fn find_active(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions \
             WHERE user_id = $1 \
               AND status IN ('active', 'trial') \
               AND current_period_end > NOW() \
             ORDER BY current_period_end DESC LIMIT 1"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Set the cancellation flags on a subscription (user-initiated cancel /
    /// reactivate). Returns the updated row.
    pub async fn set_cancellation(
        pool: &PgPool,
        id: DbId,
        status: &str,
        cancel_at_period_end: bool,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "UPDATE subscriptions SET \
                 status = $2, \
                 cancel_at_period_end = $3, \
                 canceled_at = CASE WHEN $3 THEN NOW() ELSE NULL END, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .bind(status)
            .bind(cancel_at_period_end)
            .fetch_optional(pool)
            .await
    }

    /// Update payment-linkage fields on a subscription.
    pub async fn update_payment_method(
        pool: &PgPool,
        id: DbId,
        payment_method_id: &str,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "UPDATE subscriptions SET payment_method_id = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .bind(payment_method_id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Webhook reconciliation
    // -----------------------------------------------------------------------

    /// Apply a reconciled patch from a provider event, keyed by user id.
    ///
    /// Inserts the row on first contact, otherwise overwrites the same field
    /// set, so replaying an event converges on the same stored state.
    pub async fn upsert_reconciled(
        pool: &PgPool,
        patch: &SubscriptionPatch,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions \
                 (user_id, status, plan, current_period_end, cancel_at_period_end, \
                  subscription_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 status = EXCLUDED.status, \
                 plan = EXCLUDED.plan, \
                 current_period_end = EXCLUDED.current_period_end, \
                 cancel_at_period_end = EXCLUDED.cancel_at_period_end, \
                 subscription_id = EXCLUDED.subscription_id, \
                 updated_at = NOW() \
             RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(patch.user_id)
            .bind(&patch.status)
            .bind(patch.plan.as_deref())
            .bind(patch.current_period_end)
            .bind(patch.cancel_at_period_end)
            .bind(patch.subscription_id.as_deref())
            .fetch_one(pool)
            .await
    }
}
