//! Client error type.

use thiserror::Error;

use crate::shared::{ConfigError, SharedError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input rejected before any request was sent
    #[error("{}", .0.user_message())]
    Validation(#[from] SharedError),

    /// A gated call was attempted with no stored session
    #[error("not signed in")]
    NotAuthenticated,

    /// The API answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session format error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no config directory available for the session file")]
    NoConfigDir,
}

impl ClientError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401 answers and for calls made without a session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::NotAuthenticated) || self.status() == Some(401)
    }
}
