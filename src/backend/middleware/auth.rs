/**
 * Authentication Extractor
 *
 * Resolves the session cookie to a stored user for routes that require a
 * logged-in client.
 */

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};

use crate::backend::auth::service::Authenticator;
use crate::backend::auth::sessions::{Session, SessionStore};
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;

/// Axum extractor for the authenticated user
///
/// Rejects with 401 when the request has no live session, or when the
/// session's user no longer exists.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    Authenticator: FromRef<S>,
    SessionStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});

        let auth = Authenticator::from_ref(state);
        let user = auth.current_user(&session).await?.ok_or_else(|| {
            tracing::warn!("Request without an authenticated session");
            BackendError::handler(StatusCode::UNAUTHORIZED, "Not logged in")
        })?;

        Ok(AuthUser(user))
    }
}
