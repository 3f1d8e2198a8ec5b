//! # DomainError
//!
//! Centralized error handling for the blogging service.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed registration or patch input; the message names the field.
    #[error("{0}")]
    Validation(String),

    /// A live user already holds the normalized email.
    #[error("a user with this email already exists")]
    DuplicateEmail,

    /// Missing or unusable credentials on a request.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Token signature invalid, payload malformed, or expired.
    #[error("invalid token")]
    InvalidToken,

    /// Authenticated, but not the owner of the target resource.
    #[error("access denied")]
    Forbidden,

    /// Resource or sub-resource absent (e.g. blog, comment, user).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Store unreachable or an operation was rejected. The driver detail is
    /// logged at the adapter; only this opaque form crosses the boundary.
    #[error("store error: {0}")]
    Store(String),
}

/// A specialized Result type for the blogging domain.
pub type Result<T> = std::result::Result<T, DomainError>;
