//! Route Configuration Module
//!
//! Configures all HTTP routes for the auth server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── auth_routes.rs  - /auth/* endpoints
//! ```
//!
//! # Routes
//!
//! - `GET /` - Home page, echoes `?msg=`
//! - `POST /auth/login` - User login
//! - `POST /auth/register` - User registration
//! - `GET /auth/logout` - User logout
//! - `GET /auth/me` - Current user

/// Main router creation
pub mod router;

/// Authentication endpoints
pub mod auth_routes;

// Re-export commonly used functions
pub use router::create_router;
