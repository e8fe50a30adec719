//! Runtime configuration from environment variables.
//!
//! - `DATABASE_URL`: `postgres://…` / `postgresql://…` or `sqlite:…`. Falls back to
//!   [`FALLBACK_DATABASE_URL`] when unset.
//! - `HOST` / `PORT`: listen address, default `0.0.0.0:3000`.
//! - `DATABASE_MAX_CONNECTIONS`: pool size, default 5.
//! - `REQUEST_BODY_LIMIT`: maximum request body in bytes, default 1 MiB.

use crate::error::ConfigError;

/// Local file store used when no `DATABASE_URL` is configured.
pub const FALLBACK_DATABASE_URL: &str = "sqlite:///tmp/starwars.db";

pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    Sqlite,
}

impl DatabaseBackend {
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(DatabaseBackend::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(DatabaseBackend::Sqlite)
        } else {
            let scheme = url.split(':').next().unwrap_or(url);
            Err(ConfigError::UnsupportedDatabase(scheme.to_string()))
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub backend: DatabaseBackend,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub body_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build config from any variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| FALLBACK_DATABASE_URL.to_string());
        let backend = DatabaseBackend::from_url(&database_url)?;

        Ok(Config {
            database_url,
            backend,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_var("PORT", get("PORT"), 3000)?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), 5)?,
            body_limit: parse_var("REQUEST_BODY_LIMIT", get("REQUEST_BODY_LIMIT"), DEFAULT_BODY_LIMIT)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value }),
    }
}
