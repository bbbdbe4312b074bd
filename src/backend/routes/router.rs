/**
 * Main Router Configuration
 *
 * Assembles the complete router:
 * 1. `/health`
 * 2. `/api` routes (public and gated)
 * 3. Static serving of stored uploads under `/uploads`
 * 4. A JSON 404 fallback
 * 5. Request tracing and permissive CORS around everything
 */

use axum::{http::Uri, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::health::health;
use crate::backend::server::state::AppState;

/// Create the main application router
///
/// # Arguments
///
/// * `app_state` - Application state shared by all handlers
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router, &app_state);

    let router = router.nest_service("/uploads", ServeDir::new(app_state.uploads.dir()));

    let router = router.fallback(not_found);

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}

async fn not_found(uri: Uri) -> BackendError {
    BackendError::not_found(format!("Not Found - {uri}"))
}
