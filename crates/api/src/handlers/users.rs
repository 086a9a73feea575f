//! Handlers for the current user's own profile.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use learnhub_core::error::CoreError;
use learnhub_db::models::user::{UpdateUser, UserResponse};
use learnhub_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}

/// GET /api/v1/users/me
pub async fn get_me(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let record = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(record),
    }))
}

/// PUT /api/v1/users/me
///
/// Update the caller's display name.
pub async fn update_me(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let updated = UserRepo::update(
        &state.pool,
        user.user_id,
        &UpdateUser {
            name: Some(input.name.trim().to_string()),
            role: None,
            is_verified: None,
            blocked: None,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: user.user_id,
    }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(updated),
    }))
}
