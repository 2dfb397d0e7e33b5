use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ReadingError {
    #[error("Reading not found")]
    ReadingNotFound,

    #[error("No readings in the requested period")]
    NoReadings,

    #[error("No result for the requested period")]
    NoResult,

    #[error("Invalid period")]
    InvalidPeriod,
}

impl ReadingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReadingError::ReadingNotFound => StatusCode::NOT_FOUND,
            ReadingError::NoReadings => StatusCode::NOT_FOUND,
            ReadingError::NoResult => StatusCode::NOT_FOUND,
            ReadingError::InvalidPeriod => StatusCode::BAD_REQUEST,
        }
    }
}
