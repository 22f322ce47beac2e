/**
 * Registration Handler
 *
 * POST /auth/register with a form-encoded username and password.
 *
 * # Registration Process
 *
 * 1. Check whether the username is taken
 * 2. Hash password using bcrypt
 * 3. Insert the user in a transaction and commit
 * 4. Redirect home with "Registered successfully"
 *
 * A taken username redirects home with "Username already exists" and
 * leaves the stored user untouched. Registration does not log the user in.
 */
use axum::extract::{Form, State};

use crate::backend::auth::handlers::types::{AuthRedirect, RegisterRequest};
use crate::backend::auth::service::Authenticator;
use crate::backend::error::BackendError;

/// Registration handler
///
/// # Errors
///
/// * `500 Internal Server Error` - If hashing, the lookup or the insert fails
pub async fn register(
    State(auth): State<Authenticator>,
    Form(request): Form<RegisterRequest>,
) -> Result<AuthRedirect, BackendError> {
    tracing::info!("Registration request for username: {}", request.username);
    auth.register(&request.username, &request.password).await
}
