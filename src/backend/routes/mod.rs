//! Routes Module
//!
//! Route configuration and router assembly.
//!
//! # Architecture
//!
//! - **`router`** - Top-level router: API, static uploads, health, layers
//! - **`api_routes`** - `/api` endpoints, split into public and gated groups
//! - **`health`** - Liveness and database check
//!
//! # Route Table
//!
//! ```text
//! POST   /api/users           register
//! POST   /api/users/login     login
//! GET    /api/users/me        current user            (gated)
//! GET    /api/todos           list                    (gated)
//! POST   /api/todos           create                  (gated)
//! GET    /api/todos/{id}      read one                (gated)
//! PUT    /api/todos/{id}      update                  (gated)
//! DELETE /api/todos/{id}      delete                  (gated)
//! GET    /uploads/{name}      stored attachment
//! GET    /health              liveness
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

/// Health check endpoint
pub mod health;

// Re-export commonly used functions
pub use router::create_router;
