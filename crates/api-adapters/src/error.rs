//! HTTP error payloads and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns: every failure leaves as a
//! JSON `{"message": ...}` body with a status from the table below, and
//! store failures are masked behind a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::DomainError;
use serde_json::json;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::DuplicateEmail => StatusCode::FORBIDDEN,
            DomainError::Unauthenticated(_) | DomainError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &err {
            // Driver details were already logged at the adapter; callers
            // only ever see this.
            DomainError::Store(_) => "internal server error".to_string(),
            other => other.to_string(),
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}
