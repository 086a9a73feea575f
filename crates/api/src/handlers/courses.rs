//! Course handlers: catalogue, CRUD, and playback-order maintenance.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use learnhub_core::error::CoreError;
use learnhub_core::pagination::{clamp_limit, clamp_page, offset};
use learnhub_core::types::DbId;
use learnhub_db::models::course::{Course, CreateCourse, UpdateCourse};
use learnhub_db::models::video::Video;
use learnhub_db::repositories::{CourseRepo, VideoRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CourseDetail {
    pub course: Course,
    /// Videos resolved in playback order.
    pub videos: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub struct AddVideoRequest {
    pub video_id: DbId,
    pub position: usize,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub video_order: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// GET /api/v1/courses
///
/// Public catalogue listing with pagination.
pub async fn list_courses(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);

    let items = CourseRepo::list(&state.pool, true, limit, offset(page, limit)).await?;
    let total = CourseRepo::count(&state.pool, true).await?;

    Ok(Json(DataResponse {
        data: Paginated {
            items,
            total,
            page,
            limit,
        },
    }))
}

/// GET /api/v1/courses/{id}
///
/// A course plus its videos resolved in playback order.
pub async fn get_course(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    let videos = CourseRepo::videos_in_order(&state.pool, course_id).await?;

    Ok(Json(DataResponse {
        data: CourseDetail { course, videos },
    }))
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/courses
pub async fn create_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }

    let course = CourseRepo::create(&state.pool, &input, admin.user_id).await?;

    tracing::info!(
        course_id = course.id,
        user_id = admin.user_id,
        title = %course.title,
        "Course created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// PUT /api/v1/courses/{id}
///
/// Update descriptive fields. A replaced thumbnail's old object is removed
/// from storage best-effort.
pub async fn update_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<impl IntoResponse> {
    let existing = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    let updated = CourseRepo::update(&state.pool, course_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    if let Some(new_thumbnail) = &input.thumbnail_url {
        if !existing.thumbnail_url.is_empty() && *new_thumbnail != existing.thumbnail_url {
            if let Err(err) = state.storage.delete_thumbnail(&existing.thumbnail_url).await {
                tracing::warn!(course_id, error = %err, "Failed to delete replaced thumbnail");
            }
        }
    }

    tracing::info!(course_id, user_id = admin.user_id, "Course updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/courses/{id}
///
/// Delete a course and clean up its video records so no ordering entries or
/// back-references dangle.
pub async fn delete_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CourseRepo::delete(&state.pool, course_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }));
    }

    let removed_videos = VideoRepo::delete_by_course(&state.pool, course_id).await?;

    tracing::info!(
        course_id,
        user_id = admin.user_id,
        removed_videos,
        "Course deleted",
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Playback order
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/videos
///
/// Insert a video into the playback order at a zero-based position (a
/// position equal to the current length appends). Returns the new order.
pub async fn add_video_to_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<AddVideoRequest>,
) -> AppResult<impl IntoResponse> {
    let order =
        CourseRepo::add_video_at(&state.pool, course_id, input.video_id, input.position).await?;

    tracing::info!(
        course_id,
        video_id = input.video_id,
        position = input.position,
        user_id = admin.user_id,
        "Video inserted into course order",
    );

    Ok(Json(DataResponse { data: order }))
}

/// DELETE /api/v1/courses/{id}/videos/{video_id}
///
/// Remove a video from the playback order. Returns the new order.
pub async fn remove_video_from_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((course_id, video_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let order = CourseRepo::remove_video(&state.pool, course_id, video_id).await?;

    tracing::info!(
        course_id,
        video_id,
        user_id = admin.user_id,
        "Video removed from course order",
    );

    Ok(Json(DataResponse { data: order }))
}

/// POST /api/v1/courses/{id}/reorder
///
/// Replace the playback order wholesale. Every id must already belong to the
/// course; omitted ids are dropped from the order.
pub async fn reorder_videos(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let order = CourseRepo::reorder_videos(&state.pool, course_id, &input.video_order).await?;

    tracing::info!(
        course_id,
        videos = order.len(),
        user_id = admin.user_id,
        "Course order replaced",
    );

    Ok(Json(DataResponse { data: order }))
}
