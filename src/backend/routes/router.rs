/**
 * Router Configuration
 *
 * Combines all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Home page (`GET /`)
 * 2. Auth routes (under /auth)
 * 3. Fallback handler (404)
 *
 * Every request passes through `TraceLayer`, which logs method, path,
 * status and latency.
 */

use axum::{
    extract::Query,
    http::StatusCode,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::backend::auth::handlers::types::HomeQuery;
use crate::backend::routes::auth_routes::configure_auth_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (database pool, sessions, authenticator)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let home_path = app_state.config.home_path.clone();

    let router = Router::new().route(&home_path, get(home_handler));

    // Add auth routes
    let router = configure_auth_routes(router);

    // Fallback handler for 404
    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Landing page target of every message redirect
///
/// Shows the `msg` query parameter when present.
async fn home_handler(Query(query): Query<HomeQuery>) -> String {
    match query.msg {
        Some(msg) => format!("Welcome to Chatter!\n{msg}"),
        None => "Welcome to Chatter!".to_string(),
    }
}
