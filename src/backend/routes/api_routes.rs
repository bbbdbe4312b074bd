/**
 * API Routes Configuration
 *
 * Everything under `/api`. Registration and login are public; every other
 * route is wrapped in the auth gate with `route_layer`, so unknown paths
 * still fall through to the 404 fallback instead of answering 401.
 *
 * Todo create/update carry up to two files, so those routes get a body limit
 * sized from the per-file cap rather than axum's 2 MB default.
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::todos::{create_todo, delete_todo, get_todo, list_todos, update_todo};

/// Headroom for the text fields and multipart framing around the files
const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Largest request body the todo routes accept
pub fn todo_body_limit(max_file_bytes: u64) -> usize {
    let limit = max_file_bytes
        .saturating_mul(2)
        .saturating_add(FORM_OVERHEAD_BYTES);
    usize::try_from(limit).unwrap_or(usize::MAX)
}

/// Add the `/api` routes to the router
///
/// # Arguments
///
/// * `router` - The router to extend
/// * `app_state` - Needed up front by the auth gate layer
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/users", post(register))
        .route("/api/users/login", post(login));

    let protected = Router::new()
        .route("/api/users/me", get(get_me))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .layer(DefaultBodyLimit::max(todo_body_limit(
            app_state.uploads.max_file_bytes(),
        )))
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router.merge(public).merge(protected)
}
