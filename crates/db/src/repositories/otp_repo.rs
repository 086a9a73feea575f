//! Repository for the `otps` table.

use learnhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::otp::Otp;

const OTP_COLUMNS: &str = "id, email, code, purpose, expires_at, used, created_at";

/// Provides storage for one-time verification codes.
pub struct OtpRepo;

impl OtpRepo {
    /// Store a freshly generated code.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        code: &str,
        purpose: &str,
        ttl_minutes: i64,
    ) -> Result<Otp, sqlx::Error> {
        let query = format!(
            "INSERT INTO otps (email, code, purpose, expires_at) \
             VALUES ($1, $2, $3, NOW() + ($4 || ' minutes')::INTERVAL) \
             RETURNING {OTP_COLUMNS}"
        );
        sqlx::query_as::<_, Otp>(&query)
            .bind(email)
            .bind(code)
            .bind(purpose)
            .bind(ttl_minutes.to_string())
            .fetch_one(pool)
            .await
    }

    /// Latest unused, unexpired code for an email + purpose pair.
    pub async fn find_latest_valid(
        pool: &PgPool,
        email: &str,
        purpose: &str,
    ) -> Result<Option<Otp>, sqlx::Error> {
        let query = format!(
            "SELECT {OTP_COLUMNS} FROM otps \
             WHERE email = $1 AND purpose = $2 AND used = FALSE AND expires_at > NOW() \
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, Otp>(&query)
            .bind(email)
            .bind(purpose)
            .fetch_optional(pool)
            .await
    }

    /// Mark a code as consumed.
    pub async fn mark_used(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE otps SET used = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Drop expired codes. Run opportunistically; there is no TTL index.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM otps WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
