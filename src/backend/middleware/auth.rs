/**
 * Authentication Middleware
 *
 * Guards every route it is layered on. A request gets through only with a
 * `Bearer` token that verifies against the signing secret and whose subject
 * is still a stored user. The resolved user is attached to the request
 * extensions for handlers to pick up with `AuthUser`.
 *
 * # Failure Messages
 *
 * - `Not authorized, no token` - header missing or not `Bearer <token>`
 * - `Not authorized, invalid token` - bad signature, expired, or bad subject
 * - `Not authorized, user not found` - the subject no longer exists
 *
 * All three are 401 and none is retried.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

pub const NO_TOKEN: &str = "Not authorized, no token";
pub const INVALID_TOKEN: &str = "Not authorized, invalid token";
pub const USER_NOT_FOUND: &str = "Not authorized, user not found";

/// The requester, as resolved by the gate. Carries no password hash.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        BackendError::unauthenticated(NO_TOKEN)
    })?;

    let claims = verify_token(token, app_state.auth.jwt_secret()).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        BackendError::unauthenticated(INVALID_TOKEN)
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!("Token subject is not a user id");
        BackendError::unauthenticated(INVALID_TOKEN)
    })?;

    let user = get_user_by_id(&app_state.db_pool, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(%user_id, "Token subject no longer exists");
            BackendError::unauthenticated(USER_NOT_FOUND)
        })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser::from(user));

    Ok(next.run(request).await)
}

/// Extractor for the user the gate attached
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthenticated(NO_TOKEN)
            })?;

        Ok(AuthUser(user))
    }
}
