//! Repository for the `courses` table and its playback-order operations.

use learnhub_core::error::CoreError;
use learnhub_core::ordering;
use learnhub_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::course::{Course, CreateCourse, UpdateCourse};
use crate::models::video::Video;
use crate::repositories::VideoRepo;

const COURSE_COLUMNS: &str = "\
    id, title, subtitle, description, thumbnail_url, video_order, is_paid, \
    is_public, skills, author, created_by, version, created_at, updated_at";

/// Provides CRUD and playback-order operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Create a new course. The playback order starts empty.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCourse,
        created_by: DbId,
    ) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses \
                 (title, subtitle, description, thumbnail_url, is_paid, is_public, \
                  skills, author, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COURSE_COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(input.is_paid)
            .bind(input.is_public)
            .bind(Json(&input.skills))
            .bind(&input.author)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a course by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List courses ordered by creation date (newest first).
    ///
    /// `public_only` hides unpublished courses from the catalogue; the admin
    /// listing passes `false` to see everything.
    pub async fn list(
        pool: &PgPool,
        public_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COURSE_COLUMNS} FROM courses \
             WHERE ($1 = FALSE OR is_public) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(public_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total course count for pagination, with the same visibility filter.
    pub async fn count(pool: &PgPool, public_only: bool) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM courses WHERE ($1 = FALSE OR is_public)")
                .bind(public_only)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Update a course's descriptive fields. The playback order is never
    /// touched here -- only the ordering operations below mutate it.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET \
                 title = COALESCE($2, title), \
                 subtitle = COALESCE($3, subtitle), \
                 description = COALESCE($4, description), \
                 thumbnail_url = COALESCE($5, thumbnail_url), \
                 is_paid = COALESCE($6, is_paid), \
                 is_public = COALESCE($7, is_public), \
                 skills = COALESCE($8, skills), \
                 author = COALESCE($9, author), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COURSE_COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.subtitle.as_deref())
            .bind(input.description.as_deref())
            .bind(input.thumbnail_url.as_deref())
            .bind(input.is_paid)
            .bind(input.is_public)
            .bind(input.skills.as_ref().map(Json))
            .bind(input.author.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a course by ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Playback-order operations
    // -----------------------------------------------------------------------
    //
    // All of these read the current row, compute the new ordering in memory,
    // and write the single mutated field back guarded by the row's version
    // token. A concurrent mutation between read and write surfaces as
    // `CoreError::Conflict`; callers re-read and retry.

    /// Insert `video_id` at `position` in the course's playback order.
    pub async fn add_video_at(
        pool: &PgPool,
        course_id: DbId,
        video_id: DbId,
        position: usize,
    ) -> Result<Vec<DbId>, DbError> {
        let course = Self::require(pool, course_id).await?;
        let next = ordering::insert_at(&course.video_order.0, video_id, position)?;
        Self::commit_video_order(pool, course_id, course.version, &next).await?;
        Ok(next)
    }

    /// Replace the playback order wholesale after validating that every
    /// proposed id is already a member of the current order.
    pub async fn reorder_videos(
        pool: &PgPool,
        course_id: DbId,
        new_order: &[DbId],
    ) -> Result<Vec<DbId>, DbError> {
        let course = Self::require(pool, course_id).await?;
        ordering::validate_reorder(&course.video_order.0, new_order)?;
        Self::commit_video_order(pool, course_id, course.version, new_order).await?;
        Ok(new_order.to_vec())
    }

    /// Remove `video_id` from the course's playback order.
    pub async fn remove_video(
        pool: &PgPool,
        course_id: DbId,
        video_id: DbId,
    ) -> Result<Vec<DbId>, DbError> {
        let course = Self::require(pool, course_id).await?;
        let next = ordering::remove(&course.video_order.0, video_id)?;
        Self::commit_video_order(pool, course_id, course.version, &next).await?;
        Ok(next)
    }

    /// Resolve the playback order into full video records, in order.
    ///
    /// Point lookups run sequentially; any id that no longer resolves fails
    /// the whole call. An empty order resolves to an empty list.
    pub async fn videos_in_order(pool: &PgPool, course_id: DbId) -> Result<Vec<Video>, DbError> {
        let course = Self::require(pool, course_id).await?;

        let mut videos = Vec::with_capacity(course.video_order.0.len());
        for &video_id in course.video_order.0.iter() {
            let video = VideoRepo::find_by_id(pool, video_id)
                .await?
                .ok_or(CoreError::DanglingReference(video_id))?;
            videos.push(video);
        }
        Ok(videos)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn require(pool: &PgPool, course_id: DbId) -> Result<Course, DbError> {
        Self::find_by_id(pool, course_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "Course",
                    id: course_id,
                }
                .into()
            })
    }

    /// Compare-and-swap write of the playback order.
    async fn commit_video_order(
        pool: &PgPool,
        course_id: DbId,
        expected_version: i64,
        order: &[DbId],
    ) -> Result<(), DbError> {
        let result = sqlx::query(
            "UPDATE courses SET video_order = $3, version = version + 1, updated_at = NOW() \
             WHERE id = $1 AND version = $2",
        )
        .bind(course_id)
        .bind(expected_version)
        .bind(Json(order))
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::Conflict(
                "Course ordering was modified concurrently; retry".into(),
            )
            .into());
        }
        Ok(())
    }
}
