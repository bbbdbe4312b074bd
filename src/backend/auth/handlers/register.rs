/**
 * Registration Handler
 *
 * POST /api/users
 *
 * # Registration Process
 *
 * 1. Validate name, email and password
 * 2. Reject an email that is already registered
 * 3. Hash the password with bcrypt
 * 4. Insert the user and return a fresh token
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::{json_body, normalize_email};
use crate::backend::auth::password::hash_password;
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::types::USER_EXISTS;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{AuthResponse, RegisterRequest};

/// Register handler
///
/// # Returns
///
/// `201 Created` with `{ id, name, email, token }`
///
/// # Errors
///
/// * `400 Bad Request` - A field rule failed, or the email is taken
/// * `500 Internal Server Error` - Database, hashing or signing failed
///
/// # Example Request
///
/// ```http
/// POST /api/users HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "Ann", "email": "ann@example.com", "password": "secret1" }
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let mut request = json_body(payload)?;
    request.name = request.name.trim().to_string();
    request.email = normalize_email(&request.email);

    request.validate().inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected registration");
    })?;

    if get_user_by_email(&state.db_pool, &request.email)
        .await?
        .is_some()
    {
        tracing::warn!(email = %request.email, "Registration for existing email");
        return Err(BackendError::conflict(USER_EXISTS));
    }

    let password_hash = hash_password(request.password, state.auth.bcrypt_cost).await?;

    // The unique index still catches a concurrent registration for the same email.
    let user = create_user(&state.db_pool, &request.name, &request.email, &password_hash).await?;

    let token = create_token(user.id, &user.email, state.auth.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }),
    ))
}
