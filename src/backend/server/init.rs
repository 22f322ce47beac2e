/**
 * Server Initialization
 *
 * Builds the application state and the router.
 *
 * # Initialization Process
 *
 * 1. Validate the configuration
 * 2. Connect to the database and run migrations
 * 3. Create the session store and authenticator
 * 4. Start the periodic expired-session sweep
 * 5. Create and configure the router
 */

use std::time::Duration;

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// How often expired sessions are purged from memory
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the configuration is invalid or the database cannot be opened
/// or migrated.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing auth server");

    config.validate()?;

    let app_state = AppState::from_config(config).await?;

    let sessions = app_state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!("Purged {} expired sessions", purged);
            }
        }
    });

    let app = create_router(app_state);
    tracing::info!("Router configured with periodic session sweep");

    Ok(app)
}
