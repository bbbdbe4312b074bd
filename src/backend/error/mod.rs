//! Backend Error Module
//!
//! This module defines the single error type every backend layer reports with.
//! Handlers return it directly; axum turns it into a JSON response.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` and its status/message mapping
//! - **`conversion`** - `IntoResponse` and the error detail switch
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Response Body
//!
//! ```json
//! { "message": "Todo not found", "status": 404, "stack": null }
//! ```
//!
//! `stack` carries internal detail only while error detail is exposed
//! (anything but production mode).

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::{details_exposed, set_expose_details};
pub use types::BackendError;
