/**
 * Authentication Handler Types
 *
 * Request and response types shared by the login, register, logout and me
 * handlers.
 */

use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::Role;

/// Login form
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    /// Plaintext password (verified against the stored hash, never logged)
    pub password: String,
}

/// Registration form
///
/// No format rules: any username and password are accepted.
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    /// Plaintext password (hashed before storage)
    pub password: String,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub username: String,
    pub role: Role,
}

/// Optional `msg` query parameter on the home page
#[derive(Deserialize, Debug, Default)]
pub struct HomeQuery {
    pub msg: Option<String>,
}

/// A 303 See Other response produced by an auth operation
///
/// Carries the destination and, when the operation touched the session, the
/// `Set-Cookie` value to send along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRedirect {
    location: String,
    message: Option<String>,
    set_cookie: Option<String>,
}

impl AuthRedirect {
    /// Redirect to `path` without a message
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            location: path.into(),
            message: None,
            set_cookie: None,
        }
    }

    /// Redirect to `path` with a percent-encoded `msg` query parameter
    pub fn with_message(path: &str, message: &str) -> Self {
        Self {
            location: format!("{}?msg={}", path, urlencoding::encode(message)),
            message: Some(message.to_string()),
            set_cookie: None,
        }
    }

    /// Attach a `Set-Cookie` value
    pub fn with_cookie(mut self, set_cookie: Option<String>) -> Self {
        self.set_cookie = set_cookie;
        self
    }

    /// Value of the `Location` header
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Decoded `msg` carried by the redirect, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.set_cookie.as_deref()
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        let mut response = Redirect::to(&self.location).into_response();
        if let Some(cookie) = self.set_cookie {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => tracing::error!("Invalid Set-Cookie value: {:?}", e),
            }
        }
        response
    }
}
