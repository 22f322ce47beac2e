/**
 * Get Current User Handler
 *
 * GET /auth/me returns the username and role behind the session cookie.
 * Anonymous requests are rejected with 401 by the `AuthUser` extractor.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::middleware::auth::AuthUser;

/// Get current user handler
///
/// # Example Response
///
/// ```json
/// { "username": "alice", "role": "judge" }
/// ```
pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        username: user.username,
        role: user.role,
    })
}
