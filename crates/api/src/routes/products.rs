//! Route definitions for subscription products (admin only).

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Product routes mounted at `/products`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/{id}/price", put(products::update_product_price))
        .route("/{id}/status", put(products::update_product_status))
}
