//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be wired into the binary.

use crate::error::Result;
use crate::models::{Blog, BlogPatch, Comment, User, UserUpdate};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence contract for user records.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, user: User) -> Result<Uuid>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    /// Lookup by normalized (lowercase) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Applies the present fields; returns the matched count (0 or 1).
    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<u64>;
    /// Returns the deleted count (0 or 1).
    async fn delete(&self, id: Uuid) -> Result<u64>;
    async fn list(&self) -> Result<Vec<User>>;
}

/// Persistence contract for blog documents, comments included.
///
/// Comments have no collection of their own: they travel inside the blog
/// document, and `replace_comments` rewrites the whole list in one write.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BlogRepo: Send + Sync {
    async fn insert(&self, blog: Blog) -> Result<Uuid>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>>;
    /// Shallow field merge; returns the matched count (0 or 1).
    async fn update_fields(&self, id: Uuid, patch: BlogPatch) -> Result<u64>;
    /// Appends one comment to the embedded list, atomically where the
    /// store supports it. Returns the matched count (0 or 1).
    async fn push_comment(&self, id: Uuid, comment: Comment) -> Result<u64>;
    /// Overwrites the embedded comment list. Last write wins.
    async fn replace_comments(&self, id: Uuid, comments: Vec<Comment>) -> Result<u64>;
    /// Returns the deleted count (0 or 1); a missing id is 0, not an error.
    async fn delete(&self, id: Uuid) -> Result<u64>;
    async fn list(&self) -> Result<Vec<Blog>>;
}

/// Credential contract: password hashing and bearer-token handling.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait CredentialService: Send + Sync {
    /// One-way salted hash; the same input never hashes identically twice.
    fn hash_password(&self, raw: &str) -> Result<String>;
    /// `false` on any mismatch, including an unparseable stored hash.
    fn verify_password(&self, raw: &str, hash: &str) -> bool;
    /// Signs a token whose single claim is the user id.
    fn issue_token(&self, user_id: Uuid) -> Result<String>;
    /// Recovers the user id, or [`DomainError::InvalidToken`].
    fn verify_token(&self, token: &str) -> Result<Uuid>;
}
