//! Presigned upload-URL handlers.
//!
//! Clients upload video and thumbnail files straight to object storage; the
//! API only mints time-limited PUT URLs. The returned `file_key` is what gets
//! stored on the video record afterwards.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadUrlRequest {
    pub file_name: String,
    /// Logical kind, used as the key prefix (`video`, `thumbnail`, ...).
    pub file_type: String,
    pub content_type: String,
}

#[derive(Debug, Serialize)]
pub struct UploadUrlResponse {
    pub upload_url: String,
    pub file_key: String,
}

/// POST /api/v1/s3/generate-video-url
pub async fn video_upload_url(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UploadUrlRequest>,
) -> AppResult<impl IntoResponse> {
    let file_key = build_key(&user, &input)?;

    let upload_url = state
        .storage
        .video_upload_url(&file_key, &input.content_type)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to generate upload URL: {e}")))?;

    Ok(Json(DataResponse {
        data: UploadUrlResponse {
            upload_url,
            file_key,
        },
    }))
}

/// POST /api/v1/s3/generate-thumbnail-url
pub async fn thumbnail_upload_url(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UploadUrlRequest>,
) -> AppResult<impl IntoResponse> {
    let file_key = build_key(&user, &input)?;

    let upload_url = state
        .storage
        .thumbnail_upload_url(&file_key, &input.content_type)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to generate upload URL: {e}")))?;

    Ok(Json(DataResponse {
        data: UploadUrlResponse {
            upload_url,
            file_key,
        },
    }))
}

/// Object keys are namespaced by kind and uploader: `<kind>/<user>/<name>`.
fn build_key(user: &AuthUser, input: &UploadUrlRequest) -> Result<String, AppError> {
    if input.file_name.trim().is_empty() {
        return Err(AppError::BadRequest("file_name is required".into()));
    }
    if input.file_type.trim().is_empty() {
        return Err(AppError::BadRequest("file_type is required".into()));
    }
    if input.content_type.trim().is_empty() {
        return Err(AppError::BadRequest("content_type is required".into()));
    }

    Ok(format!(
        "{}/{}/{}",
        input.file_type.trim(),
        user.user_id,
        input.file_name.trim()
    ))
}
