/**
 * Authentication Routes
 *
 * - `POST /auth/login` - Log in, 303 to the role's landing path
 * - `POST /auth/register` - Register, 303 home with a message
 * - `GET /auth/logout` - Clear the session, 303 home
 * - `GET /auth/me` - Current user (requires a session)
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, logout, register};
use crate::backend::server::state::AppState;

/// Configure authentication routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with the `/auth/*` routes configured
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", get(logout))
        .route("/auth/me", get(get_me))
}
