//! Error types for the finance service

use common::error::DatabaseError;
use thiserror::Error;

/// Failures surfaced by the user and entry services
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Unknown email or wrong password
    #[error("{0}")]
    Authentication(String),

    /// A domain rule was violated; the message names the rule
    #[error("{0}")]
    BusinessRule(String),

    /// Update or delete was called on an entry that was never persisted
    #[error("Entry has no identifier")]
    MissingIdentifier,

    /// Password hashing or hash parsing failed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Infrastructure failure from the backing store
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ServiceError {
    pub fn business(message: impl Into<String>) -> Self {
        ServiceError::BusinessRule(message.into())
    }
}

/// Type alias for service results
pub type ServiceResult<T> = Result<T, ServiceError>;
