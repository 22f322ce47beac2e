/**
 * Login Handler
 *
 * POST /auth/login with a form-encoded username and password.
 *
 * # Authentication Process
 *
 * 1. Look up user by exact username
 * 2. Verify password using bcrypt
 * 3. On success, start a fresh session and redirect by role
 * 4. On failure, redirect home with "Invalid username or password"
 *
 * Every outcome is a 303 redirect; unknown users and wrong passwords are
 * indistinguishable to the client.
 */
use axum::extract::{Form, State};

use crate::backend::auth::handlers::types::{AuthRedirect, LoginRequest};
use crate::backend::auth::service::Authenticator;
use crate::backend::auth::sessions::Session;
use crate::backend::error::BackendError;

/// Login handler
///
/// # Errors
///
/// * `500 Internal Server Error` - If the database query or password
///   verification fails
pub async fn login(
    State(auth): State<Authenticator>,
    mut session: Session,
    Form(request): Form<LoginRequest>,
) -> Result<AuthRedirect, BackendError> {
    tracing::info!("Login request for: {}", request.username);
    auth.login(&mut session, &request.username, &request.password)
        .await
}
