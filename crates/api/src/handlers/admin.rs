//! Admin handlers: user administration, moderation stats, course overview,
//! and regional pricing management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use learnhub_core::error::CoreError;
use learnhub_core::pagination::{clamp_limit, clamp_page, offset};
use learnhub_core::types::DbId;
use learnhub_db::models::pricing::UpsertRegionalPricing;
use learnhub_db::models::user::{UpdateUser, UserResponse};
use learnhub_db::repositories::{CourseRepo, PricingRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// GET /api/v1/admin/users
pub async fn list_users(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);

    let users = UserRepo::list(&state.pool, limit, offset(page, limit)).await?;
    let total = UserRepo::count(&state.pool).await?;

    let items: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(DataResponse {
        data: Paginated {
            items,
            total,
            page,
            limit,
        },
    }))
}

/// GET /api/v1/admin/users/stats
pub async fn user_stats(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = UserRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update a user's role, verification, or blocked flag.
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    let updated = UserRepo::update(&state.pool, user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    tracing::info!(user_id, admin_id = admin.user_id, "User updated by admin");

    Ok(Json(DataResponse {
        data: UserResponse::from(updated),
    }))
}

/// DELETE /api/v1/admin/users/{id}
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = UserRepo::delete(&state.pool, user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }

    tracing::info!(user_id, admin_id = admin.user_id, "User deleted by admin");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/courses
///
/// Course listing without the public-visibility filter.
pub async fn list_all_courses(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);

    let items = CourseRepo::list(&state.pool, false, limit, offset(page, limit)).await?;
    let total = CourseRepo::count(&state.pool, false).await?;

    Ok(Json(DataResponse {
        data: Paginated {
            items,
            total,
            page,
            limit,
        },
    }))
}

/// PUT /api/v1/admin/pricing/{region}
pub async fn upsert_pricing(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(region): Path<String>,
    Json(input): Json<UpsertRegionalPricing>,
) -> AppResult<impl IntoResponse> {
    if region.trim().is_empty() {
        return Err(AppError::BadRequest("region is required".into()));
    }
    if input.monthly_price < 0 || input.yearly_price < 0 {
        return Err(AppError::BadRequest("prices must not be negative".into()));
    }

    let pricing = PricingRepo::upsert(&state.pool, region.trim(), &input).await?;

    tracing::info!(
        region = %pricing.region_code,
        admin_id = admin.user_id,
        "Regional pricing updated",
    );

    Ok(Json(DataResponse { data: pricing }))
}
