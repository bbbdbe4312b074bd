/**
 * Backend Error Types
 *
 * One enum covers the whole request path: input validation, the auth gate,
 * ownership checks, and the storage/crypto collaborators underneath.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `InvalidInput` - a field rule was broken (400)
 * - `Unauthenticated` - no usable bearer token, or its user is gone (401)
 * - `Forbidden` - the record belongs to someone else (403)
 * - `NotFound` - no record with that id (404)
 * - `Conflict` - the email is already registered (400)
 * - `InvalidCredentials` - unknown email or wrong password (400)
 *
 * ## Internal Errors
 *
 * Everything wrapping a collaborator error maps to 500. The client sees a
 * generic message; the wrapped error is logged and, outside production,
 * echoed in the `stack` field.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

pub const USER_EXISTS: &str = "User already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const TODO_NOT_FOUND: &str = "Todo not found";
pub const NOT_OWNER: &str = "User not authorized";
pub const INTERNAL: &str = "Internal server error";

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// A request field failed validation
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Missing, malformed or unverifiable credentials
    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    /// The requester does not own the record
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A unique field is already taken
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl BackendError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `InvalidInput`, `Conflict`, `InvalidCredentials` - 400 Bad Request
    /// - `Unauthenticated` - 401 Unauthorized
    /// - `Forbidden` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } | Self::Conflict { .. } | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error hides an internal failure from the client
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// The message safe to show a client
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput { message }
            | Self::Unauthenticated { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message } => message.clone(),
            Self::InvalidCredentials => INVALID_CREDENTIALS.to_string(),
            _ => INTERNAL.to_string(),
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        let SharedError::ValidationError { message, .. } = err;
        Self::InvalidInput { message }
    }
}
