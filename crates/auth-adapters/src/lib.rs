//! # auth-adapters
//!
//! Argon2id password hashing, always compiled, plus the JWT-backed
//! [`CredentialService`](domains::CredentialService) implementation behind
//! the `auth-jwt` feature.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use domains::{DomainError, Result};

#[cfg(feature = "auth-jwt")]
pub mod jwt;
#[cfg(feature = "auth-jwt")]
pub use jwt::JwtCredentials;

/// Hashes with a fresh random salt; the same input never produces the same
/// output twice.
pub fn hash_password(raw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| DomainError::Store(format!("password hashing failed: {err}")))
}

/// Verifies a password against a stored hash. A hash that does not parse
/// counts as a mismatch, never an error.
pub fn verify_password(raw: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .is_ok()
}
