//! Domain error type shared by the store access, auth and service layers.
//!
//! Variants mirror the response taxonomy, except that authentication and
//! authorization failures stay distinct here and are only collapsed into a
//! single wire status by the API layer.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or invalid input
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Missing, malformed, expired or otherwise invalid credentials
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Valid credentials, wrong principal or role
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Referenced resource does not exist or is soft-deleted
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness violation
    #[error("conflict: {0}")]
    Conflict(String),

    /// Store failure that was not classified by the store access layer
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Classify a write failure: unique violations become `Conflict`,
    /// foreign key violations become `InvalidRequest`, anything else is
    /// passed through unclassified.
    pub fn classify_write(
        err: sqlx::Error,
        conflict_message: &str,
        reference_message: &str,
    ) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::conflict(conflict_message);
            }
            if db_err.is_foreign_key_violation() {
                return Self::invalid_request(reference_message);
            }
        }
        Self::Database(err)
    }

    /// Classify a single-row read: `RowNotFound` becomes `NotFound`.
    pub fn classify_read(err: sqlx::Error, not_found_message: &str) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found(not_found_message),
            other => Self::Database(other),
        }
    }
}
