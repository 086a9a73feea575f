//! User entity model and DTOs.

use learnhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub is_verified: bool,
    pub blocked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_verified: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. The password is hashed before it gets here.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
}

/// DTO for admin updates to a user. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_verified: Option<bool>,
    pub blocked: Option<bool>,
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserStats {
    pub total: i64,
    pub verified: i64,
    pub blocked: i64,
    pub admins: i64,
}
