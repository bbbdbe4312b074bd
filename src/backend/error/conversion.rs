/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers can return it directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "message": "Error message",
 *   "status": 400,
 *   "stack": "Invalid input: Error message"
 * }
 * ```
 *
 * `stack` is `null` once `set_expose_details(false)` has been called, which
 * the server does at start-up in production mode.
 */

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::error::types::BackendError;

static EXPOSE_DETAILS: AtomicBool = AtomicBool::new(true);

/// Toggle the `stack` field of error bodies process-wide
pub fn set_expose_details(expose: bool) {
    EXPOSE_DETAILS.store(expose, Ordering::Relaxed);
}

pub fn details_exposed() -> bool {
    EXPOSE_DETAILS.load(Ordering::Relaxed)
}

impl BackendError {
    /// Build the JSON error body, with or without internal detail
    pub fn to_body(&self, expose_details: bool) -> serde_json::Value {
        let status = self.status_code();
        let stack = expose_details.then(|| self.to_string());
        json!({
            "message": self.message(),
            "status": status.as_u16(),
            "stack": stack,
        })
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        (status, Json(self.to_body(details_exposed()))).into_response()
    }
}
