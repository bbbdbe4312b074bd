/**
 * Get Current User Handler
 *
 * GET /api/users/me. The gate has already resolved the token to a stored
 * user, so this only reshapes it.
 */

use axum::response::Json;

use crate::backend::middleware::AuthUser;
use crate::shared::UserResponse;

/// Get current user handler
///
/// # Example Response
///
/// ```json
/// {
///   "id": "123e4567-e89b-12d3-a456-426614174000",
///   "name": "Ann",
///   "email": "ann@example.com",
///   "createdAt": "2025-01-01T00:00:00Z",
///   "updatedAt": "2025-01-01T00:00:00Z"
/// }
/// ```
pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.user_id,
        name: user.name,
        email: user.email,
        created_at: user.created_at,
        updated_at: user.updated_at,
    })
}
