//! Application configuration module
//!
//! Provides the configuration types for the auth server. Values come from
//! environment variables (see [`AppConfig::from_env`]) or are assembled with
//! [`AppConfigBuilder`] in tests.

use std::time::Duration;
use thiserror::Error;

/// Default database location when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://chatter.db";

/// Default session lifetime: 14 days.
pub const DEFAULT_SESSION_MAX_AGE_SECS: u64 = 14 * 24 * 60 * 60;

/// Path prefix reserved for the auth endpoints.
pub const AUTH_PREFIX: &str = "/auth";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection URL
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub database_max_connections: u32,
    /// TCP port the server listens on
    pub server_port: u16,
    /// Username that is granted the admin role at registration
    pub admin_username: String,
    /// Landing page and target of every message redirect
    pub home_path: String,
    /// Post-login destination for admins
    pub admin_path: String,
    /// Post-login destination for judges
    pub judge_path: String,
    /// bcrypt work factor used for new password hashes
    pub bcrypt_cost: u32,
    /// Name of the cookie carrying the session id
    pub session_cookie_name: String,
    /// Lifetime of a session, mirrored into the cookie's Max-Age
    pub session_max_age: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: 5,
            server_port: 3000,
            admin_username: "admin".to_string(),
            home_path: "/".to_string(),
            admin_path: "/admin".to_string(),
            judge_path: "/judge".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            session_cookie_name: "chatter_session".to_string(),
            session_max_age: Duration::from_secs(DEFAULT_SESSION_MAX_AGE_SECS),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment.
    ///
    /// Unset variables fall back to [`AppConfig::default`]. Set but
    /// unparseable values are reported rather than silently replaced.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            database_url: env_or("DATABASE_URL", defaults.database_url),
            database_max_connections: env_parse(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            server_port: env_parse("SERVER_PORT", defaults.server_port)?,
            admin_username: env_or("ADMIN_USERNAME", defaults.admin_username),
            home_path: env_or("HOME_PATH", defaults.home_path),
            admin_path: env_or("ADMIN_PATH", defaults.admin_path),
            judge_path: env_or("JUDGE_PATH", defaults.judge_path),
            bcrypt_cost: env_parse("BCRYPT_COST", defaults.bcrypt_cost)?,
            session_cookie_name: env_or("SESSION_COOKIE_NAME", defaults.session_cookie_name),
            session_max_age: Duration::from_secs(env_parse(
                "SESSION_MAX_AGE_SECS",
                defaults.session_max_age.as_secs(),
            )?),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::invalid(
                "DATABASE_MAX_CONNECTIONS",
                "must be at least 1",
            ));
        }
        for (key, path) in [
            ("HOME_PATH", &self.home_path),
            ("ADMIN_PATH", &self.admin_path),
            ("JUDGE_PATH", &self.judge_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidPath(format!("{key}={path}")));
            }
            // Paths end up in the Location header.
            if path.chars().any(|c| c.is_control()) {
                return Err(ConfigError::invalid(key, "must not contain control characters"));
            }
        }
        if self.home_path == AUTH_PREFIX || self.home_path.starts_with(&format!("{AUTH_PREFIX}/")) {
            return Err(ConfigError::invalid(
                "HOME_PATH",
                format!("must not be under {AUTH_PREFIX}"),
            ));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid("BCRYPT_COST", "must be between 4 and 31"));
        }
        if self.session_cookie_name.is_empty()
            || !self
                .session_cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::invalid(
                "SESSION_COOKIE_NAME",
                "must be non-empty and contain only letters, digits, '_' or '-'",
            ));
        }
        if self.session_max_age.is_zero() {
            return Err(ConfigError::invalid("SESSION_MAX_AGE_SECS", "must be positive"));
        }
        Ok(())
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid(key, format!("cannot parse '{raw}'"))),
        Err(_) => Ok(default),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    database_max_connections: Option<u32>,
    server_port: Option<u16>,
    admin_username: Option<String>,
    home_path: Option<String>,
    admin_path: Option<String>,
    judge_path: Option<String>,
    bcrypt_cost: Option<u32>,
    session_cookie_name: Option<String>,
    session_max_age: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn database_max_connections(mut self, max: u32) -> Self {
        self.database_max_connections = Some(max);
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    /// Set the username that registers as admin
    pub fn admin_username(mut self, username: impl Into<String>) -> Self {
        self.admin_username = Some(username.into());
        self
    }

    pub fn home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = Some(path.into());
        self
    }

    pub fn admin_path(mut self, path: impl Into<String>) -> Self {
        self.admin_path = Some(path.into());
        self
    }

    pub fn judge_path(mut self, path: impl Into<String>) -> Self {
        self.judge_path = Some(path.into());
        self
    }

    /// Set the bcrypt cost. Tests use the minimum (4) to stay fast.
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn session_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.session_cookie_name = Some(name.into());
        self
    }

    pub fn session_max_age(mut self, max_age: Duration) -> Self {
        self.session_max_age = Some(max_age);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            database_url: self.database_url.unwrap_or(defaults.database_url),
            database_max_connections: self
                .database_max_connections
                .unwrap_or(defaults.database_max_connections),
            server_port: self.server_port.unwrap_or(defaults.server_port),
            admin_username: self.admin_username.unwrap_or(defaults.admin_username),
            home_path: self.home_path.unwrap_or(defaults.home_path),
            admin_path: self.admin_path.unwrap_or(defaults.admin_path),
            judge_path: self.judge_path.unwrap_or(defaults.judge_path),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
            session_cookie_name: self
                .session_cookie_name
                .unwrap_or(defaults.session_cookie_name),
            session_max_age: self.session_max_age.unwrap_or(defaults.session_max_age),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid path (must start with '/'): {0}")]
    InvalidPath(String),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            message: message.into(),
        }
    }
}
