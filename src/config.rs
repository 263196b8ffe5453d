//! Runtime configuration read from the environment. `run()` loads `.env` first.

use anyhow::{Context, Result};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub session_ttl: Duration,
    pub session_capacity: u64,
    pub max_item_rows: usize,
    pub invoice_title: String,
    pub invoice_filename: String,
    /// Empty means any origin is allowed.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            session_ttl: Duration::from_secs(30 * 60),
            session_capacity: 10_000,
            max_item_rows: 200,
            invoice_title: "testApp \"electronic bill\"".to_string(),
            invoice_filename: "items.pdf".to_string(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: '{}'", key, raw)),
        _ => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let session_ttl_secs = parse_or(&lookup, "SESSION_TTL_SECS", defaults.session_ttl.as_secs())?;
        if session_ttl_secs == 0 {
            anyhow::bail!("SESSION_TTL_SECS must be greater than zero");
        }

        let max_item_rows = parse_or(&lookup, "MAX_ITEM_ROWS", defaults.max_item_rows)?;
        if max_item_rows == 0 {
            anyhow::bail!("MAX_ITEM_ROWS must be greater than zero");
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            session_ttl: Duration::from_secs(session_ttl_secs),
            session_capacity: parse_or(&lookup, "SESSION_CAPACITY", defaults.session_capacity)?,
            max_item_rows,
            invoice_title: lookup("INVOICE_TITLE").unwrap_or(defaults.invoice_title),
            invoice_filename: lookup("INVOICE_FILENAME").unwrap_or(defaults.invoice_filename),
            cors_allowed_origins,
        })
    }
}
