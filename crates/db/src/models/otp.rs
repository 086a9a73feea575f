//! One-time verification codes for registration and password reset.

use learnhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A code is valid for registration confirmation or password reset.
pub const PURPOSE_REGISTRATION: &str = "registration";
pub const PURPOSE_RESET: &str = "reset";

/// A row from the `otps` table.
///
/// The code itself is only ever logged/delivered out-of-band, never returned
/// by an API response.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Otp {
    pub id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub code: String,
    pub purpose: String,
    pub expires_at: Timestamp,
    pub used: bool,
    pub created_at: Timestamp,
}
