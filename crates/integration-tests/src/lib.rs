//! Shared fixtures for the router-level test suites: an application wired
//! over the in-memory adapters, plus small helpers for speaking JSON+cookie
//! HTTP through `tower::ServiceExt::oneshot`.

#![cfg(feature = "web-axum")]

use std::sync::Arc;

use api_adapters::metrics::Metrics;
use api_adapters::{router, AppState};
use auth_adapters::JwtCredentials;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use services::{AccountService, BlogService};
use storage_adapters::{InMemoryBlogRepo, InMemoryUserRepo};
use tower::ServiceExt;

pub const TEST_TOKEN_TTL: u64 = 3600;

/// A fresh application over empty in-memory stores.
pub fn test_app() -> Router {
    let credentials = Arc::new(JwtCredentials::new("integration-test-secret", TEST_TOKEN_TTL));
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepo::new()),
        credentials,
    ));
    let blogs = Arc::new(BlogService::new(Arc::new(InMemoryBlogRepo::new())));
    router(AppState {
        accounts,
        blogs,
        metrics: Arc::new(Metrics::new()),
        token_ttl_secs: TEST_TOKEN_TTL,
    })
}

/// Sends one request; returns status, parsed JSON body (Null when empty),
/// and the raw `Set-Cookie` header when present.
pub async fn send(
    app: &Router,
    request: Request<Body>,
) -> (StatusCode, Value, Option<String>) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("infallible router");
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().expect("ascii cookie").to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body, set_cookie)
}

/// JSON request builder; attaches the session cookie when given.
pub fn json_request(
    method: &str,
    uri: &str,
    body: Value,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("valid request")
}

/// Extracts `token=...` out of a `Set-Cookie` header, ready to send back.
pub fn session_from(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

/// Registers a user and logs in, returning the session cookie pair.
pub async fn register_and_login(app: &Router, full_name: &str, email: &str) -> String {
    let (status, _, _) = send(
        app,
        json_request(
            "POST",
            "/auth/registration",
            serde_json::json!({
                "fullname": full_name,
                "email": email,
                "password": "password1",
                "confirmPassword": "password1",
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed for {email}");

    let (status, _, set_cookie) = send(
        app,
        json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "email": email, "password": "password1" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed for {email}");
    session_from(&set_cookie.expect("login sets the session cookie"))
}

/// Creates a blog as the given session; returns its id from the listing.
pub async fn create_blog(app: &Router, cookie: &str, title: &str) -> String {
    let (status, _, _) = send(
        app,
        json_request(
            "POST",
            "/blogs/create_blog",
            serde_json::json!({ "title": title, "mainContent": "some content" }),
            Some(cookie),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "blog creation failed");

    let (_, body, _) = send(app, get_request("/blogs", None)).await;
    body["blogs"]
        .as_array()
        .expect("blogs array")
        .iter()
        .find(|blog| blog["title"] == title)
        .expect("created blog listed")["id"]
        .as_str()
        .expect("blog id")
        .to_string()
}
