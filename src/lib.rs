//! todoboard - Main Library
//!
//! A personal todo service: a REST API where authenticated users create,
//! search, tag and attach files to their own todos, plus a client library
//! that talks to it and remembers the signed-in session.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between the server and the client
//!   - Todo and user wire types
//!   - Input validation rules
//!   - Error and configuration types
//!
//! - **`backend`** - Server-side code (only compiled with the `ssr` feature)
//!   - Axum HTTP server and route table
//!   - bcrypt credentials and JWT bearer tokens
//!   - Todo CRUD with per-user ownership checks
//!   - Attachment storage
//!
//! - **`client`** - API client (only compiled with the `client` feature)
//!   - Typed calls for every endpoint
//!   - Pluggable session persistence
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables `backend` (Axum, sqlx, bcrypt, jsonwebtoken)
//! - **`client`** - Enables `client` (reqwest)
//!
//! Both are on by default.
//!
//! # Usage
//!
//! ## Server-Side
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
//!
//! ## Client
//!
//! ```rust,no_run
//! use todoboard::client::{ApiClient, ClientConfig, FileSessionStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(ClientConfig::from_env()?, FileSessionStore::default_location()?)?;
//! client.login("ann@example.com", "secret1").await?;
//! let page = client.list_todos(&Default::default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation and serialization failures
//! - `backend::BackendError` for everything the server can answer with
//! - `client::ClientError` for transport, session and API failures

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// API client and session persistence
#[cfg(feature = "client")]
pub mod client;
