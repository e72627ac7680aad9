//! Registration store errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The submitted profile URL is already registered by another owner.
    /// This is the only storage failure the workflow distinguishes.
    #[error("profile URL already registered")]
    DuplicateUrl,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a sqlx error, turning a unique-constraint violation on
    /// `profile_url` into the distinguished `DuplicateUrl` conflict.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateUrl,
            _ => StoreError::Database(err),
        }
    }
}
