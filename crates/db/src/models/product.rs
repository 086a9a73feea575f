//! Subscription product entity model and DTOs.

use learnhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    /// External product identifier at the payment provider.
    pub product_id: String,
    /// External price identifier at the payment provider.
    pub price_id: String,
    /// Billing interval token (`monthly`, `yearly`, ...). The column is
    /// named `billing_interval` because `interval` is reserved in SQL.
    #[sqlx(rename = "billing_interval")]
    pub interval: String,
    pub currency: String,
    /// Current price in minor units.
    pub price: i64,
    /// Pre-discount price in minor units.
    pub original_price: i64,
    /// Product kind (`subscription`, `one_time`, ...).
    pub kind: String,
    pub trial_days: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub product_id: String,
    #[serde(default)]
    pub price_id: String,
    pub interval: String,
    pub currency: String,
    pub price: i64,
    #[serde(default)]
    pub original_price: i64,
    pub kind: String,
    #[serde(default)]
    pub trial_days: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// DTO for updating product fields. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub price_id: Option<String>,
    pub interval: Option<String>,
    pub currency: Option<String>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub kind: Option<String>,
    pub trial_days: Option<i32>,
    pub is_active: Option<bool>,
}
