use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Service configuration loaded from environment variables.
/// Fails at startup if `JOBS_PATH` is missing or a numeric value is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON array of job records loaded as the catalog snapshot.
    pub jobs_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Batches at or above this size are scored in parallel.
    pub parallel_threshold: usize,
    pub match_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            jobs_path: PathBuf::from(require_env("JOBS_PATH")?),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            parallel_threshold: parse_env("PARALLEL_THRESHOLD", 64)?,
            match_timeout_ms: parse_env("MATCH_TIMEOUT_MS", 5_000)?,
            request_timeout_ms: parse_env("REQUEST_TIMEOUT_MS", 10_000)?,
        })
    }

    /// Budget for scoring one batch, checked between jobs.
    pub fn match_timeout(&self) -> Duration {
        Duration::from_millis(self.match_timeout_ms)
    }

    /// Outer limit applied to every HTTP request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: usize = parse_env("JOBMATCH_TEST_UNSET_VARIABLE", 64).unwrap();
        assert_eq!(value, 64);
    }

    #[test]
    fn test_timeouts_convert_from_millis() {
        let config = Config {
            jobs_path: PathBuf::from("jobs.json"),
            port: 8080,
            rust_log: "info".to_string(),
            parallel_threshold: 64,
            match_timeout_ms: 1_500,
            request_timeout_ms: 3_000,
        };
        assert_eq!(config.match_timeout(), Duration::from_millis(1_500));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }
}
