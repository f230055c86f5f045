//! Error types for the store layer

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while loading rules from a backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error (when the postgres feature is enabled)
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generic backend failure
    #[error("Store error: {0}")]
    Backend(String),
}
