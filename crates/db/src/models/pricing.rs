//! Regional pricing entity model and DTOs.

use learnhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `regional_pricing` table (unique per region code).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegionalPricing {
    pub id: DbId,
    pub region_code: String,
    pub currency: String,
    pub currency_symbol: String,
    /// Prices in the currency's minor units.
    pub monthly_price: i64,
    pub yearly_price: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a region's pricing.
#[derive(Debug, Deserialize)]
pub struct UpsertRegionalPricing {
    pub currency: String,
    pub currency_symbol: String,
    pub monthly_price: i64,
    pub yearly_price: i64,
}
