//! Common test utilities and helpers
//!
//! Builds an in-memory app and wraps the request/response plumbing used by
//! the API tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use chatter_auth::backend::routes::create_router;
use chatter_auth::backend::server::AppState;
use chatter_auth::shared::AppConfig;

pub const COOKIE_NAME: &str = "chatter_session";

/// Test configuration: in-memory database and the cheapest bcrypt cost
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .database_url("sqlite::memory:")
        .bcrypt_cost(4)
        .session_cookie_name(COOKIE_NAME)
        .build()
        .expect("valid test config")
}

/// Test application with its state exposed for assertions
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let state = AppState::from_config(test_config())
            .await
            .expect("Failed to create test state");
        let router = create_router(state.clone());
        Self { state, router }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn post_form(
        &self,
        uri: &str,
        username: &str,
        password: &str,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let body = format!(
            "username={}&password={}",
            urlencoding::encode(username),
            urlencoding::encode(password)
        );
        let mut builder = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn register(&self, username: &str, password: &str) -> Response<Body> {
        self.post_form("/auth/register", username, password, None)
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Response<Body> {
        self.post_form("/auth/login", username, password, None).await
    }
}

/// `Location` header of a redirect
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
}

/// `name=value` pair of the session cookie set by a response, ready to be
/// sent back in a `Cookie` header
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| pair.starts_with(&format!("{COOKIE_NAME}=")))
        .map(str::to_string)
}

pub fn assert_see_other(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
