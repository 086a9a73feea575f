//! Payment handlers: checkout-session creation, ledger queries, and
//! regional pricing.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use learnhub_core::error::CoreError;
use learnhub_core::pagination::{clamp_limit, clamp_page, offset};
use learnhub_core::roles::ROLE_ADMIN;
use learnhub_core::types::DbId;
use learnhub_db::repositories::{PaymentRepo, PricingRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::payments::client::CheckoutParams;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    /// `monthly` or `yearly`.
    pub plan_type: String,
    /// Region code for price lookup.
    pub region: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PricingParams {
    pub region: String,
}

// ---------------------------------------------------------------------------
// Checkout
// ---------------------------------------------------------------------------

/// POST /api/v1/payments
///
/// Create a hosted checkout session for a subscription, priced by region.
pub async fn create_checkout(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCheckoutRequest>,
) -> AppResult<impl IntoResponse> {
    if input.plan_type.trim().is_empty() {
        return Err(AppError::BadRequest("plan_type is required".into()));
    }
    if input.region.trim().is_empty() {
        return Err(AppError::BadRequest("region is required".into()));
    }

    let pricing = PricingRepo::find_by_region(&state.pool, &input.region)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid region or pricing not found".into()))?;

    // Provider billing intervals are `month`/`year`.
    let (unit_amount, interval) = match input.plan_type.as_str() {
        "monthly" => (pricing.monthly_price, "month"),
        "yearly" => (pricing.yearly_price, "year"),
        _ => return Err(AppError::BadRequest("Invalid plan type".into())),
    };

    let customer = state
        .stripe
        .find_or_create_customer(&user.email, user.user_id)
        .await?;

    let session = state
        .stripe
        .create_subscription_checkout(&CheckoutParams {
            customer_id: &customer.id,
            currency: &pricing.currency,
            unit_amount,
            interval,
            product_name: "Course subscription",
            success_url: &state.config.stripe.success_url,
            cancel_url: &state.config.stripe.cancel_url,
        })
        .await?;

    tracing::info!(
        user_id = user.user_id,
        session_id = %session.id,
        plan_type = %input.plan_type,
        region = %input.region,
        "Checkout session created",
    );

    Ok(Json(DataResponse {
        data: CheckoutResponse {
            session_id: session.id,
            url: session.url,
        },
    }))
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// GET /api/v1/payments/{id}
///
/// A single payment; owners and admins only.
pub async fn get_payment(
    user: AuthUser,
    State(state): State<AppState>,
    Path(payment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let payment = PaymentRepo::find_by_id(&state.pool, payment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id: payment_id,
        }))?;

    if payment.user_id != user.user_id && user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden("Access denied".into())));
    }

    Ok(Json(DataResponse { data: payment }))
}

/// GET /api/v1/payments
///
/// The caller's payment history, newest first.
pub async fn list_payments(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);

    let items = PaymentRepo::list_by_user(&state.pool, user.user_id, limit, offset(page, limit))
        .await?;
    let total = PaymentRepo::count_by_user(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse {
        data: Paginated {
            items,
            total,
            page,
            limit,
        },
    }))
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// GET /api/v1/payments/pricing?region=
pub async fn get_regional_pricing(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PricingParams>,
) -> AppResult<impl IntoResponse> {
    if params.region.trim().is_empty() {
        return Err(AppError::BadRequest("region is required".into()));
    }

    let pricing = PricingRepo::find_by_region(&state.pool, &params.region)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!("Pricing not found for region {}", params.region))
        })?;

    Ok(Json(DataResponse { data: pricing }))
}
