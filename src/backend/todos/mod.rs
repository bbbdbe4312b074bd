//! Todo Resource Module
//!
//! CRUD and listing for a user's todos.
//!
//! # Architecture
//!
//! - **`db`** - Queries against the `todos` table
//! - **`access`** - The ownership check every by-id operation goes through
//! - **`form`** - Multipart/JSON body normalization and validation
//! - **`query`** - Lenient list query parsing
//! - **`handlers`** - HTTP handlers
//!
//! # Endpoints
//!
//! | Method | Path               | Handler       |
//! |--------|--------------------|---------------|
//! | GET    | `/api/todos`       | `list_todos`  |
//! | POST   | `/api/todos`       | `create_todo` |
//! | GET    | `/api/todos/{id}`  | `get_todo`    |
//! | PUT    | `/api/todos/{id}`  | `update_todo` |
//! | DELETE | `/api/todos/{id}`  | `delete_todo` |

pub mod access;

pub mod db;

pub mod form;

pub mod query;

pub mod handlers;

pub use handlers::{create_todo, delete_todo, get_todo, list_todos, update_todo};
