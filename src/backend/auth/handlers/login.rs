/**
 * Login Handler
 *
 * POST /api/users/login
 *
 * # Authentication Process
 *
 * 1. Validate email and password presence
 * 2. Look up user by email
 * 3. Verify password using bcrypt
 * 4. Generate JWT token
 *
 * # Security
 *
 * - Unknown email and wrong password produce the same `Invalid credentials`
 *   response
 * - Passwords are never logged or returned in responses
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::{json_body, normalize_email};
use crate::backend::auth::password::verify_password;
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{AuthResponse, LoginRequest};

/// Login handler
///
/// # Returns
///
/// `200 OK` with `{ id, name, email, token }`
///
/// # Errors
///
/// * `400 Bad Request` - Validation failed, or the credentials do not match
/// * `500 Internal Server Error` - Database, hashing or signing failed
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, BackendError> {
    let mut request = json_body(payload)?;
    request.email = normalize_email(&request.email);
    request.validate()?;

    let Some(user) = get_user_by_email(&state.db_pool, &request.email).await? else {
        tracing::warn!(email = %request.email, "Login for unknown email");
        return Err(BackendError::InvalidCredentials);
    };

    if !verify_password(request.password, user.password_hash.clone()).await? {
        tracing::warn!(user_id = %user.id, "Login with wrong password");
        return Err(BackendError::InvalidCredentials);
    }

    let token = create_token(user.id, &user.email, state.auth.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}
