//! Backend Module
//!
//! All server-side code for todoboard: an Axum HTTP server exposing the
//! todo REST API over SQLite.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, start-up
//! - **`routes`** - Route table and router assembly
//! - **`auth`** - Users, password hashing, tokens, register/login/me
//! - **`middleware`** - The bearer-token gate
//! - **`todos`** - Todo CRUD, listing and ownership checks
//! - **`uploads`** - Attachment storage
//! - **`error`** - `BackendError` and its JSON rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── todos/          - Todo resource
//! ├── uploads/        - Attachment files
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! client → auth gate → todo handler → (upload store) → SQLite
//!
//! # State Management
//!
//! `AppState` holds the connection pool, the upload store and the auth
//! settings. It is built once at start-up and never mutated, so handlers
//! receive plain clones without locks.
//!
//! # Example
//!
//! ```rust,no_run
//! use todoboard::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Todo resource
pub mod todos;

/// Attachment storage
pub mod uploads;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
