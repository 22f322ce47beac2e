//! Chatter Auth - Main Library
//!
//! Session-based username/password authentication for the Chatter web
//! application: login, registration and logout over a SQLite user table.
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration types (`AppConfig`)
//! - **`backend`** - Axum server, auth handlers, sessions, database access
//!
//! # Usage
//!
//! ```rust,no_run
//! use chatter_auth::backend::server::create_app;
//! use chatter_auth::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Endpoints
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | POST | `/auth/login` | 303 to the admin or judge landing path, or home with an error message |
//! | POST | `/auth/register` | 303 home with a success or "already exists" message |
//! | GET | `/auth/logout` | 303 home, session cleared |
//! | GET | `/auth/me` | JSON `{username, role}` or 401 |

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
