//! DashMap-backed repositories. Semantics mirror the Postgres adapter,
//! including the unique-email rule, so test suites exercise the same
//! contract the production store enforces.

use async_trait::async_trait;
use dashmap::DashMap;
use domains::{
    Blog, BlogPatch, BlogRepo, Comment, DomainError, Result, User, UserRepo, UserUpdate,
};
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: DashMap<Uuid, User>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn email_taken(&self, email: &str, excluding: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|entry| entry.email == email && Some(entry.id) != excluding)
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn insert(&self, user: User) -> Result<Uuid> {
        if self.email_taken(&user.email, None) {
            return Err(DomainError::DuplicateEmail);
        }
        let id = user.id;
        self.users.insert(id, user);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<u64> {
        if let Some(email) = update.email.as_deref() {
            if self.email_taken(email, Some(id)) {
                return Err(DomainError::DuplicateEmail);
            }
        }
        let Some(mut entry) = self.users.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(full_name) = update.full_name {
            entry.full_name = full_name;
        }
        if let Some(email) = update.email {
            entry.email = email;
        }
        if let Some(password_hash) = update.password_hash {
            entry.password_hash = password_hash;
        }
        Ok(1)
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        Ok(self.users.remove(&id).map_or(0, |_| 1))
    }

    async fn list(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        // v7 ids are time-ordered, so this is registration order.
        users.sort_by_key(|user| user.id);
        Ok(users)
    }
}

#[derive(Default)]
pub struct InMemoryBlogRepo {
    blogs: DashMap<Uuid, Blog>,
}

impl InMemoryBlogRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepo for InMemoryBlogRepo {
    async fn insert(&self, blog: Blog) -> Result<Uuid> {
        let id = blog.id;
        self.blogs.insert(id, blog);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>> {
        Ok(self.blogs.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_fields(&self, id: Uuid, patch: BlogPatch) -> Result<u64> {
        let Some(mut entry) = self.blogs.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(title) = patch.title {
            entry.title = title;
        }
        if let Some(main_content) = patch.main_content {
            entry.main_content = main_content;
        }
        Ok(1)
    }

    async fn push_comment(&self, id: Uuid, comment: Comment) -> Result<u64> {
        let Some(mut entry) = self.blogs.get_mut(&id) else {
            return Ok(0);
        };
        entry.comments.push(comment);
        Ok(1)
    }

    async fn replace_comments(&self, id: Uuid, comments: Vec<Comment>) -> Result<u64> {
        let Some(mut entry) = self.blogs.get_mut(&id) else {
            return Ok(0);
        };
        entry.comments = comments;
        Ok(1)
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        Ok(self.blogs.remove(&id).map_or(0, |_| 1))
    }

    async fn list(&self) -> Result<Vec<Blog>> {
        let mut blogs: Vec<Blog> = self.blogs.iter().map(|entry| entry.value().clone()).collect();
        blogs.sort_by_key(|blog| blog.id);
        Ok(blogs)
    }
}
