/**
 * Logout Handler
 *
 * GET /auth/logout clears the session and redirects home. It never fails
 * and does not touch the database.
 */
use axum::extract::State;

use crate::backend::auth::handlers::types::AuthRedirect;
use crate::backend::auth::service::Authenticator;
use crate::backend::auth::sessions::Session;

pub async fn logout(State(auth): State<Authenticator>, mut session: Session) -> AuthRedirect {
    auth.logout(&mut session).await
}
