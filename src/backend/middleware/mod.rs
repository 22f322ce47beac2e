//! Middleware Module
//!
//! Request processing shared by several routes.
//!
//! - **`auth`** - `AuthUser` extractor for routes that require a session

pub mod auth;

pub use auth::AuthUser;
