//! Authentication Module
//!
//! This module handles user registration, login, password hashing and bearer
//! token management.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - JWT token generation and validation
//! - **`password`** - bcrypt hashing off the async executor
//! - **`handlers`** - HTTP handlers for the user endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and AuthSettings
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! ├── password.rs     - bcrypt hash/verify
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── register.rs - POST /api/users
//!     ├── login.rs    - POST /api/users/login
//!     └── me.rs       - GET /api/users/me
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password validated → user created → token returned
//! 2. **Login**: credentials verified → token returned
//! 3. **Me**: token verified by the gate → user returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs that expire after 30 days
//! - Unknown email and wrong password fail with the same message

use std::fmt;
use std::sync::Arc;

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Password hashing
pub mod password;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, register};
pub use sessions::{create_token, verify_token, Claims};
pub use users::User;

/// Token signing secret and bcrypt cost, fixed at start-up
#[derive(Clone)]
pub struct AuthSettings {
    jwt_secret: Arc<str>,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>, bcrypt_cost: u32) -> Self {
        Self {
            jwt_secret: Arc::from(jwt_secret.into()),
            bcrypt_cost,
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
