//! Error types for credo.

use thiserror::Error;

/// Common error type for credo operations.
#[derive(Error, Debug)]
pub enum CredoError {
    /// A resource already exists (duplicate email on register).
    #[error("{0}")]
    Conflict(String),

    /// Credentials or tokens could not be verified.
    ///
    /// Carries a deliberately generic message: the same kind and text is
    /// produced whether the account does not exist or the password/token is
    /// wrong, so callers cannot probe for registered accounts.
    #[error("{0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// The request referenced a real resource but is not satisfiable
    /// (e.g. an expired reset token).
    #[error("{0}")]
    BadRequest(String),

    /// Password hashing subsystem failed. Fatal, not user-facing.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Token signing failed. Fatal, not user-facing.
    #[error("token signing failed: {0}")]
    TokenSigning(String),

    /// Database error.
    ///
    /// Wraps errors from the store backend; sqlx errors convert
    /// automatically. Never surfaced to end users with detail.
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for CredoError {
    fn from(e: sqlx::Error) -> Self {
        CredoError::Database(e.to_string())
    }
}

/// Result type alias for credo operations.
pub type Result<T> = std::result::Result<T, CredoError>;
