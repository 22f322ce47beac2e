/**
 * Backend Error Types
 *
 * This module defines error types specific to the auth server.
 * Expected authentication outcomes (bad password, taken username) are not
 * errors: they are redirects. Everything here is an infrastructure failure
 * that ends the request with a non-redirect status.
 *
 * # Error Categories
 *
 * - `HandlerError` - request-level failures with an explicit status
 * - `DatabaseError` - query, connection or transaction failures
 * - `MigrationError` - schema migration failures at startup
 * - `PasswordHashError` - bcrypt failures, including malformed stored hashes
 * - `ConfigError` - invalid configuration
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::ConfigError;

/// Backend-specific error types
///
/// Each variant maps to an HTTP status through [`BackendError::status_code`]
/// and can be returned directly from handlers.
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use chatter_auth::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::UNAUTHORIZED, "Not logged in");
/// assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing session, unknown user)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Database error from sqlx
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Migration error raised while preparing the schema
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// Password hashing or verification error
    #[error("Password hash error: {0}")]
    PasswordHashError(#[from] bcrypt::BcryptError),

    /// Configuration error
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::DatabaseError(_)
            | Self::MigrationError(_)
            | Self::PasswordHashError(_)
            | Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message that is safe to show a client
    ///
    /// Internal failures collapse to a generic message; the detail is only
    /// logged.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            _ => "Internal server error".to_string(),
        }
    }
}
