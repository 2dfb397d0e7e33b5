use super::ReadingError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Reading error: {0}")]
    ReadingError(#[from] ReadingError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
