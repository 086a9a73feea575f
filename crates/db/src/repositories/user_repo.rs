//! Repository for the `users` table.

use learnhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User, UserStats};

const USER_COLUMNS: &str = "\
    id, email, name, password_hash, role, is_verified, blocked, created_at, updated_at";

/// Provides CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Create a new user. Fails with a unique violation if the email exists.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, name, password_hash, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (emails are unique and stored lowercased).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List users ordered by creation date (newest first).
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
        let query =
            format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total user count for pagination.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Aggregate user counts for the admin dashboard.
    pub async fn stats(pool: &PgPool) -> Result<UserStats, sqlx::Error> {
        sqlx::query_as::<_, UserStats>(
            "SELECT \
                 COUNT(*) AS total, \
                 COUNT(*) FILTER (WHERE is_verified) AS verified, \
                 COUNT(*) FILTER (WHERE blocked) AS blocked, \
                 COUNT(*) FILTER (WHERE role = 'admin') AS admins \
             FROM users",
        )
        .fetch_one(pool)
        .await
    }

    /// Update a user's profile/moderation fields.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                 name = COALESCE($2, name), \
                 role = COALESCE($3, role), \
                 is_verified = COALESCE($4, is_verified), \
                 blocked = COALESCE($5, blocked), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.role.as_deref())
            .bind(input.is_verified)
            .bind(input.blocked)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's password hash (registration reset flow).
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Mark a user's email as verified.
    pub async fn mark_verified(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET is_verified = TRUE, updated_at = NOW() WHERE email = $1")
                .bind(email)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user by ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
