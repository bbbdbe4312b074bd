/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The SQLite connection pool
 * - The upload store (attachment directory and size cap)
 * - Token and password hashing settings
 *
 * Nothing in here is mutated after start-up; every handler gets a cheap clone.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * ```rust,ignore
 * async fn handler(State(pool): State<SqlitePool>) { /* ... */ }
 * ```
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::AuthSettings;
use crate::backend::uploads::UploadStore;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Where attachments live and how large they may be
    pub uploads: UploadStore,

    /// Signing secret and bcrypt cost
    pub auth: AuthSettings,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for UploadStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.uploads.clone()
    }
}

impl FromRef<AppState> for AuthSettings {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}
