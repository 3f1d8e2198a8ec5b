//! Postgres implementation of the persistence ports.
//!
//! Blogs are stored document-style: the author snapshot and the embedded
//! comment list live in JSONB columns, so a blog and its comments always
//! travel as one row. Comment appends use the JSONB concatenation operator
//! and are atomic; every other comment mutation rewrites the full list
//! (last write wins).

use async_trait::async_trait;
use domains::{
    Blog, BlogPatch, BlogRepo, Comment, DomainError, Result, User, UserRepo, UserUpdate,
};
use sqlx::error::ErrorKind;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::Row;
use uuid::Uuid;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Connects a pool sized for the configured concurrency.
pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
        .map_err(|err| {
            tracing::error!(%err, "database connection failed");
            DomainError::Store("database connection failed".into())
        })
}

/// First-boot DDL; safe to re-run on every start.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    MIGRATOR.run(pool).await.map_err(|err| {
        tracing::error!(%err, "migration failed");
        DomainError::Store("migration failed".into())
    })
}

/// Driver errors never cross the boundary: unique-index conflicts become
/// the duplicate-email failure, everything else is logged here and masked.
fn map_store_err(context: &'static str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if matches!(db.kind(), ErrorKind::UniqueViolation) {
            return DomainError::DuplicateEmail;
        }
    }
    tracing::error!(%err, context, "store operation failed");
    DomainError::Store(context.into())
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        full_name: row.get("full_name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}

fn blog_from_row(row: &PgRow) -> Blog {
    Blog {
        id: row.get("id"),
        title: row.get("title"),
        author: row.get::<Json<domains::AuthorRef>, _>("author").0,
        main_content: row.get("main_content"),
        created_date: row.get("created_date"),
        comments: row.get::<Json<Vec<Comment>>, _>("comments").0,
    }
}

pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn insert(&self, user: User) -> Result<Uuid> {
        sqlx::query(
            "INSERT INTO users (id, full_name, email, password_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| map_store_err("user insert", err))?;
        Ok(user.id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| map_store_err("user lookup", err))?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| map_store_err("user lookup", err))?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE users SET \
               full_name = COALESCE($2, full_name), \
               email = COALESCE($3, email), \
               password_hash = COALESCE($4, password_hash) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(update.full_name)
        .bind(update.email)
        .bind(update.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|err| map_store_err("user update", err))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| map_store_err("user delete", err))?;
        Ok(result.rows_affected())
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|err| map_store_err("user list", err))?;
        Ok(rows.iter().map(user_from_row).collect())
    }
}

pub struct PgBlogRepo {
    pool: PgPool,
}

impl PgBlogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepo for PgBlogRepo {
    async fn insert(&self, blog: Blog) -> Result<Uuid> {
        sqlx::query(
            "INSERT INTO blogs (id, title, author, main_content, created_date, comments) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(blog.id)
        .bind(&blog.title)
        .bind(Json(&blog.author))
        .bind(&blog.main_content)
        .bind(blog.created_date)
        .bind(Json(&blog.comments))
        .execute(&self.pool)
        .await
        .map_err(|err| map_store_err("blog insert", err))?;
        Ok(blog.id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>> {
        let row = sqlx::query("SELECT * FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| map_store_err("blog lookup", err))?;
        Ok(row.as_ref().map(blog_from_row))
    }

    async fn update_fields(&self, id: Uuid, patch: BlogPatch) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE blogs SET \
               title = COALESCE($2, title), \
               main_content = COALESCE($3, main_content) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.main_content)
        .execute(&self.pool)
        .await
        .map_err(|err| map_store_err("blog update", err))?;
        Ok(result.rows_affected())
    }

    async fn push_comment(&self, id: Uuid, comment: Comment) -> Result<u64> {
        // jsonb || object appends the object as a single array element.
        let result = sqlx::query("UPDATE blogs SET comments = comments || $2 WHERE id = $1")
            .bind(id)
            .bind(Json(&comment))
            .execute(&self.pool)
            .await
            .map_err(|err| map_store_err("comment append", err))?;
        Ok(result.rows_affected())
    }

    async fn replace_comments(&self, id: Uuid, comments: Vec<Comment>) -> Result<u64> {
        let result = sqlx::query("UPDATE blogs SET comments = $2 WHERE id = $1")
            .bind(id)
            .bind(Json(&comments))
            .execute(&self.pool)
            .await
            .map_err(|err| map_store_err("comment replace", err))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| map_store_err("blog delete", err))?;
        Ok(result.rows_affected())
    }

    async fn list(&self) -> Result<Vec<Blog>> {
        let rows = sqlx::query("SELECT * FROM blogs ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|err| map_store_err("blog list", err))?;
        Ok(rows.iter().map(blog_from_row).collect())
    }
}
