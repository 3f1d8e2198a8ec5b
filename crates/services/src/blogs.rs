//! Blog use-cases: CRUD over blog documents, the embedded comment
//! sub-resource, and the ownership rule for mutating either.

use std::sync::Arc;

use domains::{Blog, BlogPatch, BlogRepo, Comment, DomainError, Identity, Result};
use uuid::Uuid;

pub struct BlogService {
    blogs: Arc<dyn BlogRepo>,
}

impl BlogService {
    pub fn new(blogs: Arc<dyn BlogRepo>) -> Self {
        Self { blogs }
    }

    /// Creates a blog authored by `author`. The author snapshot taken here
    /// is the record all later ownership checks compare against.
    pub async fn create(
        &self,
        title: &str,
        main_content: &str,
        author: &Identity,
    ) -> Result<Uuid> {
        if title.trim().is_empty() || main_content.trim().is_empty() {
            return Err(DomainError::Validation(
                "title and mainContent are required".into(),
            ));
        }
        let blog = Blog {
            id: Uuid::now_v7(),
            title: title.to_string(),
            author: author.into(),
            main_content: main_content.to_string(),
            created_date: chrono::Utc::now().date_naive(),
            comments: Vec::new(),
        };
        let id = self.blogs.insert(blog).await?;
        tracing::info!(blog = %id, author = %author.id, "blog created");
        Ok(id)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Blog>> {
        self.blogs.find_by_id(id).await
    }

    pub async fn list(&self) -> Result<Vec<Blog>> {
        self.blogs.list().await
    }

    /// Shallow patch. Returns the pre-update snapshot when the blog
    /// existed, `None` otherwise. Concurrent edits are last-write-wins.
    pub async fn update(&self, id: Uuid, patch: BlogPatch) -> Result<Option<Blog>> {
        let prior = self.blogs.find_by_id(id).await?;
        if prior.is_some() && !patch.is_empty() {
            self.blogs.update_fields(id, patch).await?;
        }
        Ok(prior)
    }

    /// Returns the deleted count; deleting an absent id is 0, not an error.
    pub async fn delete(&self, id: Uuid) -> Result<u64> {
        let deleted = self.blogs.delete(id).await?;
        if deleted > 0 {
            tracing::info!(blog = %id, "blog deleted");
        }
        Ok(deleted)
    }

    /// Ownership is decided by the immutable author id captured at
    /// creation; emails can change, ids cannot.
    pub fn is_owner(identity: &Identity, blog: &Blog) -> bool {
        identity.id == blog.author.id
    }

    /// Loads the blog and enforces the ownership rule in one step.
    pub async fn authorize_owner(&self, identity: &Identity, blog_id: Uuid) -> Result<Blog> {
        let blog = self
            .blogs
            .find_by_id(blog_id)
            .await?
            .ok_or(DomainError::NotFound("blog"))?;
        if !Self::is_owner(identity, &blog) {
            tracing::warn!(blog = %blog_id, user = %identity.id, "ownership check failed");
            return Err(DomainError::Forbidden);
        }
        Ok(blog)
    }

    /// Appends a comment owned by `owner` to the blog's embedded list.
    pub async fn add_comment(
        &self,
        blog_id: Uuid,
        text: &str,
        owner: &Identity,
    ) -> Result<u64> {
        if self.blogs.find_by_id(blog_id).await?.is_none() {
            return Err(DomainError::NotFound("blog"));
        }
        let comment = Comment::new(text, owner);
        self.blogs.push_comment(blog_id, comment).await
    }

    /// Removes the first comment matching both the comment id and the
    /// requester's ownership. No match leaves the list untouched. When
    /// duplicate ids exist only the first position goes.
    pub async fn remove_comment(
        &self,
        blog_id: Uuid,
        comment_id: Uuid,
        requester: &Identity,
    ) -> Result<u64> {
        let blog = self
            .blogs
            .find_by_id(blog_id)
            .await?
            .ok_or(DomainError::NotFound("blog"))?;

        let mut comments = blog.comments;
        let target = comments
            .iter()
            .position(|comment| comment.id == comment_id && comment.owner_id == requester.id)
            .ok_or(DomainError::NotFound("comment"))?;
        comments.remove(target);

        self.blogs.replace_comments(blog_id, comments).await
    }
}
