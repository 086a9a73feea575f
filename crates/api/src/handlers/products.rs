//! Admin handlers for subscription products.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use learnhub_core::error::CoreError;
use learnhub_core::types::DbId;
use learnhub_db::models::product::{CreateProduct, UpdateProduct};
use learnhub_db::repositories::ProductRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriceRequest {
    pub price: i64,
    pub original_price: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub is_active: bool,
}

/// GET /api/v1/products
pub async fn list_products(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list(&state.pool, params.active_only).await?;
    Ok(Json(DataResponse { data: products }))
}

/// POST /api/v1/products
pub async fn create_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    if input.product_id.trim().is_empty() {
        return Err(AppError::BadRequest("product_id must not be empty".into()));
    }
    if input.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }

    let product = ProductRepo::create(&state.pool, &input).await?;

    tracing::info!(
        product_id = product.id,
        external_id = %product.product_id,
        user_id = admin.user_id,
        "Product created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_id(&state.pool, product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    Ok(Json(DataResponse { data: product }))
}

/// PUT /api/v1/products/{id}
pub async fn update_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    let updated = ProductRepo::update(&state.pool, product_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    tracing::info!(product_id, user_id = admin.user_id, "Product updated");

    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/v1/products/{id}/price
pub async fn update_product_price(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<UpdatePriceRequest>,
) -> AppResult<impl IntoResponse> {
    if input.price < 0 || input.original_price < 0 {
        return Err(AppError::BadRequest("prices must not be negative".into()));
    }

    let updated = ProductRepo::update_price(&state.pool, product_id, input.price, input.original_price)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    tracing::info!(
        product_id,
        price = input.price,
        user_id = admin.user_id,
        "Product price updated",
    );

    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/v1/products/{id}/status
pub async fn update_product_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let updated = ProductRepo::set_active(&state.pool, product_id, input.is_active)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    tracing::info!(
        product_id,
        is_active = input.is_active,
        user_id = admin.user_id,
        "Product status updated",
    );

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/products/{id}
pub async fn delete_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ProductRepo::delete(&state.pool, product_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }));
    }

    tracing::info!(product_id, user_id = admin.user_id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}
