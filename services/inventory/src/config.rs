use std::time::Duration;

use anyhow::{Context as _, bail};
use chrono::TimeDelta;
use jsonwebtoken::Algorithm;
use sea_orm::ConnectOptions;

use stockroom_auth_types::session::SessionManager;
use stockroom_auth_types::token::SessionCodec;

/// Inventory service configuration loaded from environment variables.
pub struct InventoryConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// Shared secret for signing session tokens. Env var: `SESSION_SECRET`.
    pub session_secret: String,
    /// HMAC algorithm for session tokens (default HS256). Env var: `SESSION_ALGORITHM`.
    pub session_algorithm: Algorithm,
    /// Sliding inactivity window (default 1800s). Env var: `SESSION_INACTIVITY_SECS`.
    pub inactivity_limit: TimeDelta,
    /// TCP port for the HTTP server (default 3120). Env var: `INVENTORY_PORT`.
    pub port: u16,
    /// Pool size (default 20). Env var: `DB_MAX_CONNECTIONS`.
    pub db_max_connections: u32,
    /// Bound on waiting for a pooled connection (default 5s). Env var: `DB_ACQUIRE_TIMEOUT_SECS`.
    pub db_acquire_timeout: Duration,
}

impl std::fmt::Debug for InventoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryConfig")
            .field("session_algorithm", &self.session_algorithm)
            .field("inactivity_limit", &self.inactivity_limit)
            .field("port", &self.port)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout", &self.db_acquire_timeout)
            .finish_non_exhaustive()
    }
}

impl InventoryConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));

        let session_algorithm = match lookup("SESSION_ALGORITHM") {
            Some(raw) => parse_algorithm(&raw)?,
            None => Algorithm::HS256,
        };
        let inactivity_secs: i64 = parse_or(&lookup, "SESSION_INACTIVITY_SECS", 1800)?;
        if inactivity_secs <= 0 {
            bail!("SESSION_INACTIVITY_SECS must be positive");
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            session_secret: required("SESSION_SECRET")?,
            session_algorithm,
            inactivity_limit: TimeDelta::seconds(inactivity_secs),
            port: parse_or(&lookup, "INVENTORY_PORT", 3120)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 20)?,
            db_acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                5,
            )?),
        })
    }

    /// Pool options with bounded acquire and connect timeouts.
    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.database_url.clone());
        options
            .max_connections(self.db_max_connections)
            .acquire_timeout(self.db_acquire_timeout)
            .connect_timeout(self.db_acquire_timeout)
            .sqlx_logging(false);
        options
    }

    pub fn session_manager(&self) -> anyhow::Result<SessionManager> {
        let codec = SessionCodec::new(&self.session_secret, self.session_algorithm)
            .context("build session codec")?;
        Ok(SessionManager::new(codec, self.inactivity_limit))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value {raw:?}")),
        None => Ok(default),
    }
}

fn parse_algorithm(raw: &str) -> anyhow::Result<Algorithm> {
    match raw.trim() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => bail!("SESSION_ALGORITHM must be HS256, HS384 or HS512, got {other:?}"),
    }
}
