//! Repository for the `regional_pricing` table.

use sqlx::PgPool;

use crate::models::pricing::{RegionalPricing, UpsertRegionalPricing};

const PRICING_COLUMNS: &str = "\
    id, region_code, currency, currency_symbol, monthly_price, yearly_price, \
    created_at, updated_at";

/// Provides lookup and upsert operations for per-region prices.
pub struct PricingRepo;

impl PricingRepo {
    /// Pricing for a region code, if configured.
    pub async fn find_by_region(
        pool: &PgPool,
        region_code: &str,
    ) -> Result<Option<RegionalPricing>, sqlx::Error> {
        let query = format!("SELECT {PRICING_COLUMNS} FROM regional_pricing WHERE region_code = $1");
        sqlx::query_as::<_, RegionalPricing>(&query)
            .bind(region_code)
            .fetch_optional(pool)
            .await
    }

    /// All configured regions.
    pub async fn list(pool: &PgPool) -> Result<Vec<RegionalPricing>, sqlx::Error> {
        let query =
            format!("SELECT {PRICING_COLUMNS} FROM regional_pricing ORDER BY region_code ASC");
        sqlx::query_as::<_, RegionalPricing>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert or overwrite a region's pricing.
    pub async fn upsert(
        pool: &PgPool,
        region_code: &str,
        input: &UpsertRegionalPricing,
    ) -> Result<RegionalPricing, sqlx::Error> {
        let query = format!(
            "INSERT INTO regional_pricing \
                 (region_code, currency, currency_symbol, monthly_price, yearly_price) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (region_code) DO UPDATE SET \
                 currency = EXCLUDED.currency, \
                 currency_symbol = EXCLUDED.currency_symbol, \
                 monthly_price = EXCLUDED.monthly_price, \
                 yearly_price = EXCLUDED.yearly_price, \
                 updated_at = NOW() \
             RETURNING {PRICING_COLUMNS}"
        );
        sqlx::query_as::<_, RegionalPricing>(&query)
            .bind(region_code)
            .bind(&input.currency)
            .bind(&input.currency_symbol)
            .bind(input.monthly_price)
            .bind(input.yearly_price)
            .fetch_one(pool)
            .await
    }
}
