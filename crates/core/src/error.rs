use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every variant is terminal for the operation that produced it; no retry
/// policy lives at this level. The API layer maps each variant onto an HTTP
/// status (`learnhub-api::error::AppError`).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Position outside `[0, len]` for a video-order insertion.
    #[error("Invalid position {position} for a list of {len} videos")]
    InvalidPosition { position: usize, len: usize },

    /// A proposed ordering references a video id the course does not contain.
    #[error("Video {0} is not part of the course ordering")]
    InvalidVideoReference(DbId),

    /// Removal was attempted on a course with no videos.
    #[error("Course has no videos")]
    EmptyList,

    /// An id in the stored ordering no longer resolves to a video record.
    #[error("Video {0} referenced by the course ordering does not exist")]
    DanglingReference(DbId),

    /// Required identity could not be resolved from provider event metadata.
    #[error("Metadata resolution failed: {0}")]
    MetadataResolution(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
