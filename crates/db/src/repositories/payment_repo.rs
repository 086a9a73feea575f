//! Repository for the `payments` ledger table.

use learnhub_core::billing::PaymentDraft;
use learnhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::Payment;

const PAYMENT_COLUMNS: &str =
    "id, user_id, gateway, transaction_id, amount, currency, status, paid_at";

/// Provides insert and lookup operations for the payment ledger.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert a ledger entry for a completed checkout.
    ///
    /// Always inserts: there is no uniqueness on `transaction_id`, so a
    /// redelivered completion event produces a second row.
    pub async fn create(pool: &PgPool, draft: &PaymentDraft) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (user_id, gateway, transaction_id, amount, currency, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PAYMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(draft.user_id)
            .bind(&draft.gateway)
            .bind(&draft.transaction_id)
            .bind(draft.amount)
            .bind(&draft.currency)
            .bind(&draft.status)
            .fetch_one(pool)
            .await
    }

    /// Find a payment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Latest payment carrying the given provider transaction id.
    pub async fn find_by_transaction_id(
        pool: &PgPool,
        transaction_id: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE transaction_id = $1 \
             ORDER BY paid_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(transaction_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's payments, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE user_id = $1 \
             ORDER BY paid_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Payment count for a user.
    pub async fn count_by_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM payments WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
