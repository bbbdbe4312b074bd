//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the backend and the API client. These types are the JSON wire format of
//! the REST API, plus the validation rules both sides apply to user input.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. Nothing in here touches the network,
//! the database or the filesystem.

/// Todo records, listing pages and todo input rules
pub mod todo;

/// User, registration and login types
pub mod user;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use todo::{DeletedTodo, Pagination, Todo, TodoPage};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
