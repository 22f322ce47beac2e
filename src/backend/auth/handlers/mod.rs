//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints. Each handler extracts
//! its inputs and delegates to [`Authenticator`](crate::backend::auth::service::Authenticator).
//!
//! # Handlers
//!
//! - **`login`** - POST /auth/login
//! - **`register`** - POST /auth/register
//! - **`logout`** - GET /auth/logout
//! - **`get_me`** - GET /auth/me

/// Request and response types
pub mod types;

/// Login handler
pub mod login;

/// Registration handler
pub mod register;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

// Re-export commonly used types
pub use types::{AuthRedirect, HomeQuery, LoginRequest, RegisterRequest, UserResponse};

// Re-export handlers
pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use register::register;
