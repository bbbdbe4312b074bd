//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A per-test application fixture (SQLite file + upload directory)
//! - Authentication test helpers
//! - Custom assertion macros


#[cfg(feature = "ssr")]
pub use app::*;
#[cfg(feature = "ssr")]
pub use auth_helpers::*;
