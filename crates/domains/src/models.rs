//! # Domain Models
//!
//! These structs represent the core entities of the blogging service.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    /// Stored lowercase; uniqueness is enforced on the normalized form.
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The authenticated user context attached to a request after token
/// verification, stripped of secret fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
        }
    }
}

/// Immutable copy of the author's identifying fields, captured when a blog
/// is created and used for later ownership checks without re-querying the
/// live user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
}

impl From<&Identity> for AuthorRef {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            full_name: identity.full_name.clone(),
        }
    }
}

/// A blog post. Comments live embedded in the post so a single fetch
/// returns the whole unit; ordering is insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: AuthorRef,
    pub main_content: String,
    /// Date-only granularity; the service never records a time component.
    pub created_date: NaiveDate,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Snapshot of the commenting user shown next to the comment text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: Uuid,
    pub full_name: String,
}

/// A comment embedded in a blog's comment list. Has no storage location of
/// its own; `owner_id` is matched against the requester on removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub owner: CommentAuthor,
    pub owner_id: Uuid,
}

impl Comment {
    /// Builds a comment owned by `identity` with a fresh time-ordered id.
    pub fn new(text: impl Into<String>, identity: &Identity) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            owner: CommentAuthor {
                id: identity.id,
                full_name: identity.full_name.clone(),
            },
            owner_id: identity.id,
        }
    }
}

/// Self-service account patch as received from the caller. A present
/// `password` carries the raw replacement and is hashed before it reaches
/// any repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Repository-level account update; the password has already been hashed.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

/// Shallow field patch for a blog. The author snapshot and the comment list
/// are deliberately not patchable through this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPatch {
    pub title: Option<String>,
    pub main_content: Option<String>,
}

impl BlogPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.main_content.is_none()
    }
}
