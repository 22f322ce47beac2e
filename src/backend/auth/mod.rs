//! Authentication Module
//!
//! Session-based username/password authentication: user records, password
//! hashing, server-side sessions, the authenticator that ties them together,
//! and the HTTP handlers in front of it.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model, role and database operations
//! ├── password.rs     - bcrypt hashing and verification
//! ├── sessions.rs     - Session store and request-scoped Session
//! ├── service.rs      - Authenticator (login, register, logout)
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Forms, responses, AuthRedirect
//!     ├── login.rs    - POST /auth/login
//!     ├── register.rs - POST /auth/register
//!     ├── logout.rs   - GET /auth/logout
//!     └── me.rs       - GET /auth/me
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username and password → uniqueness check → bcrypt hash → user stored → redirect home
//! 2. **Login**: username and password → credentials verified → session started → redirect by role
//! 3. **Logout**: session cleared → redirect home
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Session ids are random UUIDs in an HttpOnly cookie; a new id is issued on every login
//! - Unknown usernames and wrong passwords produce the same redirect

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod password;

/// Server-side sessions
pub mod sessions;

/// Credential authenticator
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthRedirect, LoginRequest, RegisterRequest, UserResponse};
pub use handlers::{get_me, login, logout, register};
pub use service::Authenticator;
pub use sessions::{Session, SessionData, SessionStore};
pub use users::{Role, User};
