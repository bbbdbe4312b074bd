//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! # Architecture
//!
//! - **`auth`** - The bearer-token gate in front of every protected route
//!
//! # Example
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/api/todos", get(list_todos))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, bearer_token, AuthUser, AuthenticatedUser};
