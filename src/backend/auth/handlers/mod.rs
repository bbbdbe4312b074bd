//! Authentication Handlers Module
//!
//! HTTP handlers for the user endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and shared body handling
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/users - User registration
//! - **`login`** - POST /api/users/login - User authentication
//! - **`get_me`** - GET /api/users/me - Current user info (behind the gate)
//!
//! # Example
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/api/users", post(register))
//!     .route("/api/users/login", post(login));
//! ```

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::backend::error::BackendError;

pub mod register;

pub mod login;

pub mod me;

pub use login::login;
pub use me::get_me;
pub use register::register;

/// Unwrap a JSON body, turning axum's rejection into a 400 with our body shape
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, BackendError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| BackendError::invalid_input(rejection.body_text()))
}

/// Emails compare case-insensitively and ignore surrounding whitespace
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
