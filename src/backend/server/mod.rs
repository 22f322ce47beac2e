//! Server Module
//!
//! Everything needed to stand up the HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database connection and migrations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `AppConfig::from_env` (done by the binary)
//! 2. **Database**: pool creation and migrations
//! 3. **State**: session store and authenticator
//! 4. **Background Tasks**: expired-session sweep
//! 5. **Router Creation**: routes and tracing layer

/// Application state management
pub mod state;

/// Database connection and migrations
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::create_app;
pub use state::AppState;
