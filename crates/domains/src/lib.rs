//! rusty-blog/crates/domains/src/lib.rs
//!
//! The central domain types and interface definitions for rusty-blog.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use uuid::Uuid;

    fn identity() -> Identity {
        Identity {
            id: Uuid::now_v7(),
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
        }
    }

    #[test]
    fn comment_snapshots_its_owner() {
        let jane = identity();
        let comment = Comment::new("first!", &jane);
        assert_eq!(comment.owner_id, jane.id);
        assert_eq!(comment.owner.full_name, "Jane Doe");
        assert_eq!(comment.text, "first!");
    }

    #[test]
    fn comment_ids_are_unique_under_rapid_creation() {
        let jane = identity();
        let a = Comment::new("a", &jane);
        let b = Comment::new("b", &jane);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn blog_serializes_with_embedded_camel_case_comments() {
        let jane = identity();
        let blog = Blog {
            id: Uuid::now_v7(),
            title: "Hello".to_string(),
            author: AuthorRef::from(&jane),
            main_content: "body".to_string(),
            created_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            comments: vec![Comment::new("hi", &jane)],
        };
        let json = serde_json::to_value(&blog).unwrap();
        assert_eq!(json["mainContent"], "body");
        assert_eq!(json["createdDate"], "2026-08-06");
        assert_eq!(json["comments"][0]["ownerId"], jane.id.to_string());
    }

    #[test]
    fn identity_strips_the_password_hash() {
        let user = User {
            id: Uuid::now_v7(),
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: chrono::Utc::now(),
        };
        let identity = Identity::from(user.clone());
        let json = serde_json::to_value(&identity).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(identity.id, user.id);
    }
}
