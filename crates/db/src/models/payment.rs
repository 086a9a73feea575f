//! Payment ledger entity model.

use learnhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `payments` table.
///
/// Ledger entries are immutable: one row per completed checkout event, no
/// update path. `transaction_id` carries the provider's session id and is
/// intentionally NOT unique -- a replayed completion event inserts a second
/// row rather than failing the webhook.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub user_id: DbId,
    pub gateway: String,
    pub transaction_id: String,
    /// Amount in the currency's minor units (cents).
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub paid_at: Timestamp,
}
