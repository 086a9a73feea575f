//! Subscription handlers: direct creation, self-service lifecycle, and
//! payment-method updates.
//!
//! These cover the user-facing surface; provider-driven state changes arrive
//! through the webhook handler instead.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use learnhub_core::billing::{SUBSCRIPTION_ACTIVE, SUBSCRIPTION_CANCELED, SUBSCRIPTION_TRIAL};
use learnhub_core::error::CoreError;
use learnhub_core::pagination::{clamp_limit, clamp_page, offset};
use learnhub_core::types::DbId;
use learnhub_db::models::subscription::{CreateSubscription, Subscription, UpdatePaymentMethod};
use learnhub_db::repositories::{ProductRepo, SubscriptionRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub product_id: DbId,
    #[serde(default)]
    pub payment_method_id: Option<String>,
}

/// POST /api/v1/subscriptions
///
/// Subscribe the caller to a product. Products carrying trial days start in
/// `trial`, everything else starts `active`.
pub async fn create_subscription(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSubscriptionRequest>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_id(&state.pool, input.product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: input.product_id,
        }))?;

    let status = if product.trial_days > 0 {
        SUBSCRIPTION_TRIAL
    } else {
        SUBSCRIPTION_ACTIVE
    };

    let subscription = SubscriptionRepo::create(
        &state.pool,
        &CreateSubscription {
            user_id: user.user_id,
            product_id: Some(product.id),
            status: status.to_string(),
            plan: Some(product.interval.clone()),
            currency: Some(product.currency.clone()),
            amount: Some(product.price),
            payment_method_id: input.payment_method_id,
            auto_renew: true,
        },
    )
    .await?;

    tracing::info!(
        subscription_id = subscription.id,
        user_id = user.user_id,
        product_id = product.id,
        status,
        "Subscription created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: subscription })))
}

/// GET /api/v1/subscriptions/{id}
pub async fn get_subscription(
    user: AuthUser,
    State(state): State<AppState>,
    Path(subscription_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let subscription = find_owned(&state, &user, subscription_id).await?;
    Ok(Json(DataResponse { data: subscription }))
}

/// GET /api/v1/subscriptions
pub async fn list_subscriptions(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);

    let items =
        SubscriptionRepo::list_by_user(&state.pool, user.user_id, limit, offset(page, limit))
            .await?;
    let total = SubscriptionRepo::count_by_user(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse {
        data: Paginated {
            items,
            total,
            page,
            limit,
        },
    }))
}

/// POST /api/v1/subscriptions/{id}/cancel
///
/// Cancel the caller's subscription: status moves to `canceled` and the
/// lapse-at-period-end flag is set.
pub async fn cancel_subscription(
    user: AuthUser,
    State(state): State<AppState>,
    Path(subscription_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, &user, subscription_id).await?;

    let updated =
        SubscriptionRepo::set_cancellation(&state.pool, subscription_id, SUBSCRIPTION_CANCELED, true)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Subscription",
                id: subscription_id,
            }))?;

    tracing::info!(subscription_id, user_id = user.user_id, "Subscription canceled");

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/subscriptions/{id}/reactivate
pub async fn reactivate_subscription(
    user: AuthUser,
    State(state): State<AppState>,
    Path(subscription_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, &user, subscription_id).await?;

    let updated =
        SubscriptionRepo::set_cancellation(&state.pool, subscription_id, SUBSCRIPTION_ACTIVE, false)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Subscription",
                id: subscription_id,
            }))?;

    tracing::info!(
        subscription_id,
        user_id = user.user_id,
        "Subscription reactivated",
    );

    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/v1/subscriptions/{id}/payment-method
pub async fn update_payment_method(
    user: AuthUser,
    State(state): State<AppState>,
    Path(subscription_id): Path<DbId>,
    Json(input): Json<UpdatePaymentMethod>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, &user, subscription_id).await?;

    let updated = SubscriptionRepo::update_payment_method(
        &state.pool,
        subscription_id,
        &input.payment_method_id,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Subscription",
        id: subscription_id,
    }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// Fetch a subscription, rejecting callers who do not own it.
async fn find_owned(
    state: &AppState,
    user: &AuthUser,
    subscription_id: DbId,
) -> Result<Subscription, AppError> {
    let subscription = SubscriptionRepo::find_by_id(&state.pool, subscription_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id: subscription_id,
        }))?;

    if subscription.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to access this subscription".into(),
        )));
    }
    Ok(subscription)
}
