use learnhub_core::error::CoreError;

/// Error type for repository operations that combine domain computation with
/// database access (the course-ordering and reconciliation paths).
///
/// Plain CRUD methods return `sqlx::Error` directly; this wrapper exists so a
/// single operation can surface either a domain failure (bad position,
/// dangling reference, CAS conflict) or a store failure without flattening
/// one into the other.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
