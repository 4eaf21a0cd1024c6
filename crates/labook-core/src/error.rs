//! Domain-level error types.

use thiserror::Error;

use crate::ports::AuthError;

/// Business errors - every rule violation is an `InvalidRequest`.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl PostError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
