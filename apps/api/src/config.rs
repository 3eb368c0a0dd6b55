use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// One year.
const MAX_SESSION_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres URL. Absent → history and accounts live in memory.
    pub database_url: Option<String>,
    /// Catalog JSON override. Absent → the bundled catalog.
    pub catalog_path: Option<PathBuf>,
    pub session_ttl_minutes: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            catalog_path: None,
            session_ttl_minutes: 24 * 60,
            port: 8000,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let session_ttl_minutes = check_session_ttl(parse_env(
            "SESSION_TTL_MINUTES",
            defaults.session_ttl_minutes,
        )?)?;

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            catalog_path: optional_env("CAREER_CATALOG_PATH").map(PathBuf::from),
            session_ttl_minutes,
            port: parse_env("PORT", defaults.port)?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn check_session_ttl(minutes: i64) -> Result<i64> {
    if !(1..=MAX_SESSION_TTL_MINUTES).contains(&minutes) {
        anyhow::bail!(
            "SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {minutes}"
        );
    }
    Ok(minutes)
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}
