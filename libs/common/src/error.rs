//! Custom error types for the common library
//!
//! Infrastructure failures shared by every service. Business failures live
//! in the services themselves.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A stored value could not be mapped back into a model
    #[error("Database decode error: {0}")]
    Decode(String),

    /// A unique constraint rejected the write
    #[error("Database conflict: {0}")]
    Conflict(String),

    /// The row targeted by an update does not exist
    #[error("Record not found: {0}")]
    NotFound(String),
}

impl From<SqlxError> for DatabaseError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::Database(ref db) if db.is_unique_violation() => {
                DatabaseError::Conflict(db.message().to_string())
            }
            other => DatabaseError::Query(other),
        }
    }
}


/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
