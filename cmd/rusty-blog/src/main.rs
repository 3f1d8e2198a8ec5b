//! # rusty-blog binary
//!
//! The entry point that assembles the application: configuration, store
//! pool, credential adapter, services, and the HTTP router.

use std::sync::Arc;

use api_adapters::{metrics::Metrics, router, AppState};
use auth_adapters::JwtCredentials;
use configs::Settings;
use secrecy::ExposeSecret;
use services::{AccountService, BlogService};
use storage_adapters::postgres::{connect, run_migrations, PgBlogRepo, PgUserRepo};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Settings first: they pull in .env before anything reads the process
    // environment.
    let settings = Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1. Store
    let pool = connect(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await?;
    run_migrations(&pool).await?;

    // 2. Credentials
    let credentials = Arc::new(JwtCredentials::new(
        settings.auth.jwt_secret.expose_secret(),
        settings.auth.token_ttl_secs,
    ));

    // 3. Services over the ports
    let accounts = Arc::new(AccountService::new(
        Arc::new(PgUserRepo::new(pool.clone())),
        credentials,
    ));
    let blogs = Arc::new(BlogService::new(Arc::new(PgBlogRepo::new(pool))));

    let state = AppState {
        accounts,
        blogs,
        metrics: Arc::new(Metrics::new()),
        token_ttl_secs: settings.auth.token_ttl_secs,
    };

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "rusty-blog listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
