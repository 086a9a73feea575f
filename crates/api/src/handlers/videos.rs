//! Video handlers: CRUD with course-order compensation, watch URLs, and
//! watch history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use learnhub_core::error::CoreError;
use learnhub_core::pagination::{clamp_limit, clamp_page, offset};
use learnhub_core::types::DbId;
use learnhub_db::models::video::{CreateVideo, UpdateVideo};
use learnhub_db::repositories::{CourseRepo, VideoRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies / query params
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VideoListParams {
    pub course_id: Option<DbId>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct WatchProgressRequest {
    pub progress_seconds: i32,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/videos?course_id=
///
/// Flat listing of a course's videos (upload order, not playback order).
pub async fn list_videos(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<VideoListParams>,
) -> AppResult<impl IntoResponse> {
    let course_id = params
        .course_id
        .ok_or_else(|| AppError::BadRequest("course_id is required".into()))?;

    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);

    let items = VideoRepo::list_by_course(&state.pool, course_id, limit, offset(page, limit)).await?;
    let total = VideoRepo::count_by_course(&state.pool, course_id).await?;

    Ok(Json(DataResponse {
        data: Paginated {
            items,
            total,
            page,
            limit,
        },
    }))
}

/// POST /api/v1/videos
///
/// Create a video record and append it to its course's playback order. If
/// the append fails the freshly created record is deleted again, so the two
/// writes act as a unit from the caller's perspective.
pub async fn create_video(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateVideo>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }
    if input.video_url.trim().is_empty() {
        return Err(AppError::BadRequest("video_url must not be empty".into()));
    }
    if input.thumbnail_url.trim().is_empty() {
        return Err(AppError::BadRequest("thumbnail_url must not be empty".into()));
    }

    let course = CourseRepo::find_by_id(&state.pool, input.course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: input.course_id,
        }))?;

    let video = VideoRepo::create(&state.pool, &input).await?;

    let append_position = course.video_order.0.len();
    if let Err(err) =
        CourseRepo::add_video_at(&state.pool, input.course_id, video.id, append_position).await
    {
        // Compensate: a video outside any playback order is unreachable.
        if let Err(cleanup_err) = VideoRepo::delete(&state.pool, video.id).await {
            tracing::error!(
                video_id = video.id,
                error = %cleanup_err,
                "Failed to clean up video after order append failed",
            );
        }
        return Err(err.into());
    }

    tracing::info!(
        video_id = video.id,
        course_id = input.course_id,
        user_id = admin.user_id,
        "Video created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}

/// GET /api/v1/videos/{id}
///
/// A video with its stored object key exchanged for a presigned watch URL.
pub async fn get_video(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(video_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut video = VideoRepo::find_by_id(&state.pool, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))?;

    video.url = state
        .storage
        .watch_url(&video.url)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to generate watch URL: {e}")))?;

    Ok(Json(DataResponse { data: video }))
}

/// PUT /api/v1/videos/{id}
///
/// Update a video. Changing `course_id` moves the video between playback
/// orders: removed from the old course, appended to the new one.
pub async fn update_video(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(video_id): Path<DbId>,
    Json(input): Json<UpdateVideo>,
) -> AppResult<impl IntoResponse> {
    let video = VideoRepo::find_by_id(&state.pool, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))?;

    if let Some(new_course_id) = input.course_id {
        if new_course_id != video.course_id {
            let new_course = CourseRepo::find_by_id(&state.pool, new_course_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Course",
                    id: new_course_id,
                }))?;

            CourseRepo::remove_video(&state.pool, video.course_id, video.id).await?;
            CourseRepo::add_video_at(
                &state.pool,
                new_course_id,
                video.id,
                new_course.video_order.0.len(),
            )
            .await?;

            tracing::info!(
                video_id,
                from_course = video.course_id,
                to_course = new_course_id,
                "Video moved between courses",
            );
        }
    }

    let updated = VideoRepo::update(&state.pool, video_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))?;

    tracing::info!(video_id, user_id = admin.user_id, "Video updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/videos/{id}
///
/// Delete a video: storage objects and playback-order membership are cleaned
/// up best-effort, the database row deletion is the hard step.
pub async fn delete_video(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(video_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let video = VideoRepo::find_by_id(&state.pool, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))?;

    if let Err(err) = state.storage.delete_video(&video.url).await {
        tracing::warn!(video_id, error = %err, "Failed to delete video object");
    }
    if !video.thumbnail.is_empty() {
        if let Err(err) = state.storage.delete_thumbnail(&video.thumbnail).await {
            tracing::warn!(video_id, error = %err, "Failed to delete thumbnail object");
        }
    }

    VideoRepo::delete(&state.pool, video_id).await?;

    if let Err(err) = CourseRepo::remove_video(&state.pool, video.course_id, video_id).await {
        tracing::warn!(
            video_id,
            course_id = video.course_id,
            error = %err,
            "Failed to remove deleted video from course order",
        );
    }

    tracing::info!(video_id, user_id = admin.user_id, "Video deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Watch history
// ---------------------------------------------------------------------------

/// POST /api/v1/videos/{id}/watch
///
/// Record the caller's progress through a video.
pub async fn update_watch_progress(
    user: AuthUser,
    State(state): State<AppState>,
    Path(video_id): Path<DbId>,
    Json(input): Json<WatchProgressRequest>,
) -> AppResult<impl IntoResponse> {
    let entry = VideoRepo::upsert_watch_progress(
        &state.pool,
        user.user_id,
        video_id,
        input.progress_seconds,
    )
    .await?;

    Ok(Json(DataResponse { data: entry }))
}

/// GET /api/v1/videos/history
///
/// The caller's watch history, most recently watched first.
pub async fn get_watch_history(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<crate::query::PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);

    let items =
        VideoRepo::list_watch_history(&state.pool, user.user_id, limit, offset(page, limit))
            .await?;
    let total = VideoRepo::count_watch_history(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse {
        data: Paginated {
            items,
            total,
            page,
            limit,
        },
    }))
}
