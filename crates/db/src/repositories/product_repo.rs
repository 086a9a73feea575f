//! Repository for the `products` table.

use learnhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

const PRODUCT_COLUMNS: &str = "\
    id, product_id, price_id, billing_interval, currency, price, original_price, \
    kind, trial_days, is_active, created_at, updated_at";

/// Provides CRUD operations for subscription products.
pub struct ProductRepo;

impl ProductRepo {
    /// Create a new product. Fails with a unique violation if the external
    /// product id already exists.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                 (product_id, price_id, billing_interval, currency, price, \
                  original_price, kind, trial_days, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.product_id)
            .bind(&input.price_id)
            .bind(&input.interval)
            .bind(&input.currency)
            .bind(input.price)
            .bind(input.original_price)
            .bind(&input.kind)
            .bind(input.trial_days)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a product by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products, optionally restricted to active ones.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE ($1 = FALSE OR is_active) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Update a product's fields.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                 price_id = COALESCE($2, price_id), \
                 billing_interval = COALESCE($3, billing_interval), \
                 currency = COALESCE($4, currency), \
                 price = COALESCE($5, price), \
                 original_price = COALESCE($6, original_price), \
                 kind = COALESCE($7, kind), \
                 trial_days = COALESCE($8, trial_days), \
                 is_active = COALESCE($9, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(input.price_id.as_deref())
            .bind(input.interval.as_deref())
            .bind(input.currency.as_deref())
            .bind(input.price)
            .bind(input.original_price)
            .bind(input.kind.as_deref())
            .bind(input.trial_days)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Update only the price pair.
    pub async fn update_price(
        pool: &PgPool,
        id: DbId,
        price: i64,
        original_price: i64,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET price = $2, original_price = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(price)
            .bind(original_price)
            .fetch_optional(pool)
            .await
    }

    /// Activate or deactivate a product.
    pub async fn set_active(
        pool: &PgPool,
        id: DbId,
        is_active: bool,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET is_active = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product by ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
