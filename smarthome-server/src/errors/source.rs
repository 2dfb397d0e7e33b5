/// Failure of a sensor catalog or reading source collaborator.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}
