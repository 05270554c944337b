use std::str::FromStr;

use anyhow::{bail, Context};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// `None` lets any origin through CORS.
    pub allowed_origin: Option<String>,
    pub log_level: tracing::Level,
}

impl ServerConfig {
    /// Read the config from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "3010");
        let port: u16 = port
            .parse()
            .with_context(|| format!("PORT is not a valid port: {port}"))?;

        let max_connections = var("DB_MAX_CONNECTIONS", "1");
        let max_connections: u32 = max_connections
            .parse()
            .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {max_connections}"))?;
        if max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        let log_level = var("LOG_LEVEL", "info");
        let log_level = tracing::Level::from_str(&log_level)
            .with_context(|| format!("LOG_LEVEL is not a log level: {log_level}"))?;

        Ok(Self {
            database_url: var("DATABASE_URL", "sqlite:database.sqlite"),
            host: var("HOST", "127.0.0.1"),
            port,
            max_connections,
            allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|origin| !origin.is_empty()),
            log_level,
        })
    }
}

/// Open the database read-only. The file must already exist.
pub async fn open_pool(config: &ServerConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid DATABASE_URL {}", config.database_url))?
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("fail to open database {}", config.database_url))?;
    Ok(pool)
}
