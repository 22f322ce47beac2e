/**
 * Application State Management
 *
 * `AppState` is the central state container shared by every handler:
 * - the SQLite connection pool
 * - the session store
 * - the authenticator built on top of both
 * - the loaded configuration
 *
 * The `FromRef` implementations let handlers and extractors take only the
 * part they need (`State<Authenticator>` or the `SessionStore`).
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::service::Authenticator;
use crate::backend::auth::sessions::SessionStore;
use crate::backend::error::BackendError;
use crate::backend::server::config::connect_database;
use crate::shared::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub sessions: SessionStore,
    pub authenticator: Authenticator,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Assemble state around an already migrated pool.
    pub fn new(db_pool: SqlitePool, config: AppConfig) -> Self {
        let sessions = SessionStore::from_config(&config);
        let authenticator = Authenticator::new(db_pool.clone(), &config);
        Self {
            db_pool,
            sessions,
            authenticator,
            config: Arc::new(config),
        }
    }

    /// Connect to the configured database, migrate it and assemble state.
    pub async fn from_config(config: AppConfig) -> Result<Self, BackendError> {
        let pool = connect_database(&config).await?;
        Ok(Self::new(pool, config))
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Authenticator {
    fn from_ref(state: &AppState) -> Self {
        state.authenticator.clone()
    }
}
