use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Console configuration loaded from environment variables.
/// Every variable has a default so the console starts against a local backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Pause standing in for interview question generation.
    pub question_prep_delay: Duration,
    /// Pause standing in for recommendation PDF export.
    pub export_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_url: std::env::var("BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            question_prep_delay: millis_env("QUESTION_PREP_DELAY_MS", 2000)?,
            export_delay: millis_env("EXPORT_DELAY_MS", 1500)?,
        })
    }
}

fn millis_env(key: &str, default_ms: u64) -> Result<Duration> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .with_context(|| format!("{key} must be a whole number of milliseconds")),
        Err(_) => Ok(Duration::from_millis(default_ms)),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for tests: no artificial delays, backend at `backend_url`.
    pub fn for_backend(backend_url: &str) -> Self {
        Config {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            question_prep_delay: Duration::ZERO,
            export_delay: Duration::ZERO,
        }
    }
}
