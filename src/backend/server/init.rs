/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, upload directory creation and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Decide whether error bodies may carry internal detail
 * 2. Open the database and run migrations
 * 3. Create the upload directory
 * 4. Create the router around the assembled `AppState`
 */

use axum::Router;

use crate::backend::auth::AuthSettings;
use crate::backend::error::{set_expose_details, BackendError};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::uploads::UploadStore;

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `config` - Loaded server configuration
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Errors
///
/// Database, migration and upload-directory failures are fatal and returned
/// to the caller.
pub async fn create_app(config: &ServerConfig) -> Result<Router, BackendError> {
    tracing::info!(environment = ?config.environment, "Initializing todoboard backend");

    set_expose_details(!config.environment.is_production());

    let db_pool = load_database(&config.database_url).await?;

    let uploads = UploadStore::new(&config.upload_dir, config.max_upload_bytes);
    uploads.ensure_dir().await?;
    tracing::info!(dir = %config.upload_dir.display(), "Upload directory ready");

    let app_state = AppState {
        db_pool,
        uploads,
        auth: AuthSettings::new(config.jwt_secret.clone(), config.bcrypt_cost),
    };

    Ok(create_router(app_state))
}
