//! Request handlers. Thin by design: decode the body, hand off to the
//! service, translate the outcome into the JSON envelope callers expect.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use domains::{BlogPatch, Identity, UserPatch};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::SESSION_COOKIE;
use crate::AppState;

fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}

/// Session cookie: HTTP-only, whole-site, expiring alongside the token.
fn session_cookie(token: String, ttl_secs: u64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::seconds(ttl_secs as i64))
        .build()
}

fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

// ── auth ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegistrationBody {
    pub fullname: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAccountBody {
    pub password: String,
}

/// A caller who already holds a *valid* session has to log out first; a
/// stale or garbage cookie does not get in the way.
async fn reject_live_session(state: &AppState, jar: &CookieJar) -> Result<(), ApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if state.accounts.holds_valid_session(cookie.value()).await {
            return Err(ApiError::new(
                StatusCode::FORBIDDEN,
                "You are already logged in. Logout",
            ));
        }
    }
    Ok(())
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegistrationBody>,
) -> Result<Json<Value>, ApiError> {
    reject_live_session(&state, &jar).await?;
    state
        .accounts
        .register(&body.fullname, &body.email, &body.password, &body.confirm_password)
        .await?;
    Ok(message("Successful registration"))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    reject_live_session(&state, &jar).await?;
    let (token, _identity) = state.accounts.login(&body.email, &body.password).await?;
    let jar = jar.add(session_cookie(token, state.token_ttl_secs));
    Ok((jar, message("Successful authorization")))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(expired_session_cookie());
    (jar, message("the user logged out"))
}

pub async fn account(Extension(identity): Extension<Identity>) -> Json<Value> {
    Json(json!({ "user": identity }))
}

pub async fn update_account(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<Value>, ApiError> {
    let matched = state.accounts.update_account(&identity, patch).await?;
    if matched > 0 {
        Ok(message("The user info successful updated"))
    } else {
        Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Woops, the info not updated",
        ))
    }
}

pub async fn delete_account(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    jar: CookieJar,
    Json(body): Json<DeleteAccountBody>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let deleted = state
        .accounts
        .delete_account(&identity, &body.password)
        .await?;
    if deleted > 0 {
        let jar = jar.remove(expired_session_cookie());
        Ok((jar, message("the account deleted")))
    } else {
        Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Sorry, operation failed. Try again",
        ))
    }
}

// ── blogs ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBlogBody {
    pub title: String,
    #[serde(rename = "mainContent")]
    pub main_content: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveCommentBody {
    #[serde(rename = "commentId")]
    pub comment_id: Uuid,
}

pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let blogs = state.blogs.list().await?;
    Ok(Json(json!({ "blogs": blogs })))
}

pub async fn create_blog(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateBlogBody>,
) -> Result<Json<Value>, ApiError> {
    state
        .blogs
        .create(&body.title, &body.main_content, &identity)
        .await
        .map_err(|err| match err {
            domains::DomainError::Validation(_) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "sorry, but the blog has not been created, try again",
            ),
            other => other.into(),
        })?;
    Ok(message("blog successful created"))
}

pub async fn edit_blog(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(blog_id): Path<Uuid>,
    Json(patch): Json<BlogPatch>,
) -> Result<Json<Value>, ApiError> {
    state.blogs.authorize_owner(&identity, blog_id).await?;
    match state.blogs.update(blog_id, patch).await? {
        Some(_prior) => Ok(message("blog successful edited")),
        None => Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "blog not changed, try again",
        )),
    }
}

pub async fn delete_blog(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(blog_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.blogs.authorize_owner(&identity, blog_id).await?;
    if state.blogs.delete(blog_id).await? > 0 {
        Ok(message("blog successful deleted"))
    } else {
        Err(ApiError::new(StatusCode::BAD_REQUEST, "blog not deleted"))
    }
}

pub async fn add_comment(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(blog_id): Path<Uuid>,
    Json(body): Json<CommentBody>,
) -> Result<Json<Value>, ApiError> {
    state
        .blogs
        .add_comment(blog_id, &body.comment, &identity)
        .await?;
    Ok(message("comment added"))
}

pub async fn remove_comment(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(blog_id): Path<Uuid>,
    Json(body): Json<RemoveCommentBody>,
) -> Result<Json<Value>, ApiError> {
    state
        .blogs
        .remove_comment(blog_id, body.comment_id, &identity)
        .await?;
    Ok(message("Comment successful removed"))
}

// ── misc ─────────────────────────────────────────────────────────────────────

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        state.metrics.encode(),
    )
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Oops, the page was not found" })),
    )
}
