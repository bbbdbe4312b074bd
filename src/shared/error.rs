//! Shared Error Types
//!
//! This module defines error types that are shared between the backend and the
//! API client. These errors represent failures that can be detected on either
//! side of the wire, before any request reaches the database.
//!
//! # Error Categories
//!
//! - `ValidationError` - User input that breaks a field rule
//!
//! # Usage
//!
//! ```rust
//! use todoboard::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title is required");
//! assert_eq!(error.user_message(), "Title is required");
//! ```
use thiserror::Error;

/// Shared error types that can occur in both client and backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The message to show an end user, without the field prefix
    pub fn user_message(&self) -> &str {
        let Self::ValidationError { message, .. } = self;
        message
    }
}
