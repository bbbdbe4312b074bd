//! Client Module
//!
//! Talks to the todoboard REST API and keeps the signed-in session between
//! runs.
//!
//! # Architecture
//!
//! - **`config`** - API base URL
//! - **`session`** - `Session` and the `SessionStore` trait with file and
//!   in-memory implementations
//! - **`api`** - `ApiClient`, one method per endpoint
//! - **`error`** - `ClientError`
//!
//! # Example
//!
//! ```rust,no_run
//! use todoboard::client::{ApiClient, ClientConfig, MemorySessionStore, TodoDraft};
//!
//! # async fn example() -> Result<(), todoboard::client::ClientError> {
//! let client = ApiClient::new(ClientConfig::default(), MemorySessionStore::new())?;
//! client.login("ann@example.com", "secret1").await?;
//! let todo = client.create_todo(TodoDraft::new("Buy milk")).await?;
//! client.delete_todo(todo.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;

pub mod config;

pub mod error;

pub mod session;

pub use api::{ApiClient, Attachment, TodoDraft, TodoPatch};
pub use config::ClientConfig;
pub use error::ClientError;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
