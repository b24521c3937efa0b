use rusqlite::ErrorCode;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Non-positive id, or no row with that id
    #[error("mood note record not found")]
    NotFound,

    /// The conditional update matched no row. The note is either gone or was
    /// modified since the client read it; re-fetch by id to tell which.
    #[error("mood note record not found or version mismatch")]
    NotFoundOrConflict,

    #[error("mood note record not found or already deleted")]
    NotFoundOrAlreadyDeleted,

    #[error("database operation timed out")]
    Timeout,

    #[error("database connection unavailable")]
    Unavailable,

    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(error: rusqlite::Error) -> Self {
        match error.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => StoreError::Timeout,
            _ => StoreError::Database(error),
        }
    }
}

impl StoreError {
    /// Any of the "no such row" outcomes
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound
                | StoreError::NotFoundOrConflict
                | StoreError::NotFoundOrAlreadyDeleted
        )
    }
}
