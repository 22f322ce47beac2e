//! Shared Module
//!
//! Types used by both the library API and the server binary. Currently this
//! is the application configuration.

pub mod config;

pub use config::{AppConfig, AppConfigBuilder, ConfigError};
