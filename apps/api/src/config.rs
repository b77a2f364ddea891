use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::analysis::readability::ReadabilityBackend;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub readability_backend: ReadabilityBackend,
    pub max_upload_bytes: usize,
    /// Analyses admitted at once. 1 processes uploads strictly one after another.
    pub max_concurrent_analyses: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            readability_backend: ReadabilityBackend::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_concurrent_analyses: 1,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let max_concurrent_analyses = parse_var(
            &lookup,
            "MAX_CONCURRENT_ANALYSES",
            defaults.max_concurrent_analyses,
        )?;
        if max_concurrent_analyses == 0 {
            bail!("MAX_CONCURRENT_ANALYSES must be at least 1");
        }

        Ok(Config {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            readability_backend: parse_var(
                &lookup,
                "READABILITY_BACKEND",
                defaults.readability_backend,
            )?,
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            max_concurrent_analyses,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
