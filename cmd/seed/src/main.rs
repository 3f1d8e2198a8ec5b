//! Seeds a development database with two demo accounts and a first post.
//! Safe to re-run: existing emails are left alone.

use configs::Settings;
use domains::{AuthorRef, Blog, BlogRepo, Comment, Identity, User, UserRepo};
use secrecy::ExposeSecret;
use storage_adapters::postgres::{connect, run_migrations, PgBlogRepo, PgUserRepo};
use uuid::Uuid;

const DEMO_PASSWORD: &str = "password1";

async fn ensure_user(users: &PgUserRepo, full_name: &str, email: &str) -> anyhow::Result<Identity> {
    if let Some(existing) = users.find_by_email(email).await? {
        println!("{email}: already present, skipping");
        return Ok(Identity::from(existing));
    }
    let user = User {
        id: Uuid::now_v7(),
        full_name: full_name.to_string(),
        email: email.to_string(),
        password_hash: auth_adapters::hash_password(DEMO_PASSWORD)?,
        created_at: chrono::Utc::now(),
    };
    let identity = Identity::from(user.clone());
    users.insert(user).await?;
    println!("{email}: created (password: {DEMO_PASSWORD})");
    Ok(identity)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let pool = connect(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await?;
    run_migrations(&pool).await?;

    let users = PgUserRepo::new(pool.clone());
    let blogs = PgBlogRepo::new(pool);

    let jane = ensure_user(&users, "Jane Doe", "jane@example.com").await?;
    let sam = ensure_user(&users, "Sam Poe", "sam@example.com").await?;

    if blogs.list().await?.is_empty() {
        let post = Blog {
            id: Uuid::now_v7(),
            title: "Welcome to rusty-blog".to_string(),
            author: AuthorRef::from(&jane),
            main_content: "This post was planted by cmd/seed.".to_string(),
            created_date: chrono::Utc::now().date_naive(),
            comments: vec![Comment::new("First!", &sam)],
        };
        blogs.insert(post).await?;
        println!("seeded the welcome post");
    } else {
        println!("blogs already present, skipping");
    }

    Ok(())
}
