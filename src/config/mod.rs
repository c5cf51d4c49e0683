//! Application configuration management

use std::{env, fmt};

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Clone)]
pub struct Config {
    /// Database URL (sqlite:// prefix) or path
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub database_max_connections: u32,

    /// Secret used to sign and verify session tokens
    pub secret_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    /// `SECRET_KEY` is required: without it no session token can be issued or
    /// verified, so startup fails here instead of at the first request.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_PATH")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "sqlite://./data/bookshelf.db".to_string());

        let secret_key = env::var("SECRET_KEY").context("SECRET_KEY is required")?;
        if secret_key.trim().is_empty() {
            anyhow::bail!("SECRET_KEY must not be empty");
        }

        Ok(Self {
            database_url,

            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,

            secret_key,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("database_max_connections", &self.database_max_connections)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
