//! Video entity model, DTOs, and watch-history types.

use learnhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `videos` table.
///
/// `url` and `thumbnail` store object-storage keys, not public URLs; the API
/// layer exchanges them for presigned URLs on read. `course_id` is a weak
/// back-reference -- membership in the course's playback order is tracked
/// separately on the course row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail: String,
    pub duration_secs: i32,
    pub is_paid: bool,
    pub course_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a video record after its file has been uploaded.
#[derive(Debug, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    #[serde(default)]
    pub duration_secs: i32,
    #[serde(default)]
    pub is_paid: bool,
    pub course_id: DbId,
}

/// DTO for updating video fields. A present `course_id` moves the video to
/// another course (the handler re-links the playback orders).
#[derive(Debug, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub duration_secs: Option<i32>,
    pub is_paid: Option<bool>,
    pub course_id: Option<DbId>,
}

/// A row from the `watch_history` table (unique per user+video pair).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WatchHistory {
    pub id: DbId,
    pub user_id: DbId,
    pub video_id: DbId,
    pub progress_seconds: i32,
    pub last_watched_at: Timestamp,
}
