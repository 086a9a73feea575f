//! Repository for the `videos` and `watch_history` tables.

use learnhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, UpdateVideo, Video, WatchHistory};

const VIDEO_COLUMNS: &str = "\
    id, title, description, url, thumbnail, duration_secs, is_paid, course_id, \
    created_at, updated_at";

const HISTORY_COLUMNS: &str = "id, user_id, video_id, progress_seconds, last_watched_at";

/// Provides CRUD operations for videos and per-user watch history.
pub struct VideoRepo;

impl VideoRepo {
    // -----------------------------------------------------------------------
    // Video CRUD
    // -----------------------------------------------------------------------

    /// Create a new video record.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos \
                 (title, description, url, thumbnail, duration_secs, is_paid, course_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {VIDEO_COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.video_url)
            .bind(&input.thumbnail_url)
            .bind(input.duration_secs)
            .bind(input.is_paid)
            .bind(input.course_id)
            .fetch_one(pool)
            .await
    }

    /// Find a video by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List videos belonging to a course, newest first.
    ///
    /// This is the flat listing; the curated playback order lives on the
    /// course row and is resolved by `CourseRepo::videos_in_order`.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE course_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(course_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Video count for a course.
    pub async fn count_by_course(pool: &PgPool, course_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Update a video's fields (including its owning course on a move).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 url = COALESCE($4, url), \
                 thumbnail = COALESCE($5, thumbnail), \
                 duration_secs = COALESCE($6, duration_secs), \
                 is_paid = COALESCE($7, is_paid), \
                 course_id = COALESCE($8, course_id), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {VIDEO_COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(input.video_url.as_deref())
            .bind(input.thumbnail_url.as_deref())
            .bind(input.duration_secs)
            .bind(input.is_paid)
            .bind(input.course_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a video by ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every video belonging to a course (course-deletion cleanup).
    pub async fn delete_by_course(pool: &PgPool, course_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE course_id = $1")
            .bind(course_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Watch history
    // -----------------------------------------------------------------------

    /// Record watch progress for a user+video pair (insert or overwrite).
    pub async fn upsert_watch_progress(
        pool: &PgPool,
        user_id: DbId,
        video_id: DbId,
        progress_seconds: i32,
    ) -> Result<WatchHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO watch_history (user_id, video_id, progress_seconds) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, video_id) DO UPDATE SET \
                 progress_seconds = EXCLUDED.progress_seconds, \
                 last_watched_at = NOW() \
             RETURNING {HISTORY_COLUMNS}"
        );
        sqlx::query_as::<_, WatchHistory>(&query)
            .bind(user_id)
            .bind(video_id)
            .bind(progress_seconds)
            .fetch_one(pool)
            .await
    }

    /// List a user's watch history, most recently watched first.
    pub async fn list_watch_history(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WatchHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM watch_history WHERE user_id = $1 \
             ORDER BY last_watched_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, WatchHistory>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Watch-history entry count for a user.
    pub async fn count_watch_history(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM watch_history WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
