//! # configs
//!
//! Process-wide settings, resolved once at startup. Sources are layered:
//! built-in defaults, then `config/default.toml` and `config/{RUN_MODE}.toml`
//! when present, then `RUSTY_BLOG__*` environment variables (loaded through
//! `.env` first). Secrets never appear in Debug output.

use config::{Config, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Default session lifetime: 30 days.
const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60 * 24 * 30;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
    #[error("{0} must be set and non-empty")]
    Missing(&'static str),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: SecretString,
    pub token_ttl_secs: u64,
}

impl Settings {
    /// Loads and validates the full settings tree. Fails fast when the
    /// store URL or signing secret is absent.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        tracing::debug!(%run_mode, "loading configuration");

        let settings: Settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 9191)?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 5)?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.token_ttl_secs", DEFAULT_TOKEN_TTL_SECS)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                Environment::with_prefix("RUSTY_BLOG")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if settings.database.url.expose_secret().is_empty() {
            return Err(SettingsError::Missing("database.url"));
        }
        if settings.auth.jwt_secret.expose_secret().is_empty() {
            return Err(SettingsError::Missing("auth.jwt_secret"));
        }
        Ok(settings)
    }
}
