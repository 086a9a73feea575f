//! Course entity model and DTOs.

use learnhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `courses` table.
///
/// `video_order` is the canonical playback order: a single JSONB array of
/// video ids, mutated only through the ordering operations on `CourseRepo`.
/// `version` is the optimistic-concurrency token those mutations
/// compare-and-swap on.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub thumbnail_url: String,
    pub video_order: Json<Vec<DbId>>,
    pub is_paid: bool,
    pub is_public: bool,
    pub skills: Json<Vec<String>>,
    pub author: String,
    pub created_by: DbId,
    #[serde(skip_serializing)]
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a course. The ordering always starts empty.
#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub author: String,
}

/// DTO for updating course fields. `video_order` is deliberately absent:
/// the ordering is never overwritten through a generic field update.
#[derive(Debug, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_paid: Option<bool>,
    pub is_public: Option<bool>,
    pub skills: Option<Vec<String>>,
    pub author: Option<String>,
}
