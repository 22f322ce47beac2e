/**
 * Database Configuration
 *
 * Opens the SQLite connection pool described by [`AppConfig`] and applies
 * the migrations under `migrations/`.
 *
 * # Error Handling
 *
 * Unlike optional services, the user store is required: without it no
 * request can be answered, so connection and migration failures are
 * returned to the caller and abort startup.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::backend::error::BackendError;
use crate::shared::AppConfig;

/// Open the connection pool and bring the schema up to date.
///
/// The database file is created when missing. For `sqlite::memory:` URLs
/// the pool is held to a single connection that never expires, because
/// every new in-memory connection would see an empty database.
pub async fn connect_database(config: &AppConfig) -> Result<SqlitePool, BackendError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    let in_memory = config.database_url.contains(":memory:");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.database_max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!("Database connection pool created successfully");

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Apply pending migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), BackendError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
