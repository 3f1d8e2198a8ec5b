//! Session and telemetry middleware.

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::error::ApiError;
use crate::AppState;

/// Name of the session cookie the browser sends back on every request.
pub const SESSION_COOKIE: &str = "token";

/// Rejects the request unless the `token` cookie resolves to a live user.
/// On success the [`domains::Identity`] rides the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default();
    let identity = state.accounts.authenticate(&token).await?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Counts every handled request under its matched route template.
pub async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;
    state
        .metrics
        .observe(&method, &path, response.status().as_u16());
    response
}
