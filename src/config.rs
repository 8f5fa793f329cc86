use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_recap_per_min: u32,

    /// Combined size cap for all uploaded parts of one request.
    pub max_upload_bytes: usize,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8000".to_string(),
            api_prefix: "/api".to_string(),
            rate_recap_per_min: 60,
            max_upload_bytes: 20 * 1024 * 1024,
            log_dir: "logs".to_string(),
        }
    }
}

fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", defaults.server_addr)?,
            api_prefix: var_or("API_PREFIX", defaults.api_prefix)?,
            rate_recap_per_min: var_or("RATE_RECAP_PER_MIN", defaults.rate_recap_per_min)?,
            max_upload_bytes: var_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            log_dir: var_or("LOG_DIR", defaults.log_dir)?,
        })
    }
}
