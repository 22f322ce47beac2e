//! Backend Module
//!
//! Server-side code for the Chatter auth service: an Axum HTTP server in
//! front of a SQLite user table and an in-memory session store.
//!
//! # Architecture
//!
//! - **`server`** - Database setup, application state, app creation
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Users, password hashing, sessions, authenticator, handlers
//! - **`middleware`** - `AuthUser` extractor
//! - **`error`** - Backend error type and its HTTP conversion
//!
//! # State Management
//!
//! `AppState` holds the connection pool, the session store, the
//! authenticator and the configuration. The session store is the only
//! shared in-process mutable state and is guarded by a `tokio::sync::RwLock`.
//! Durable state lives in the database.
//!
//! # Error Handling
//!
//! Authentication outcomes are 303 redirects carrying a `msg` query
//! parameter. `BackendError` covers infrastructure failures and converts to
//! a JSON error response.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use auth::Authenticator;
pub use error::BackendError;
pub use server::{create_app, AppState};
