use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The model endpoint settings are required; tuning knobs for the extraction
/// pipeline fall back to the defaults the pipeline was calibrated with.
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_base_url: String,
    pub extraction_model: String,
    pub port: u16,
    pub rust_log: String,
    /// Wall-clock budget for one semantic extraction attempt.
    pub semantic_timeout: Duration,
    /// Minimum self-reported confidence for accepting a semantic result.
    pub confidence_threshold: f32,
}

/// Default hard budget for the model call. Elapsed budget means fallback.
pub const DEFAULT_SEMANTIC_TIMEOUT_SECS: u64 = 6;

/// Default acceptance threshold for model-reported confidence.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = match std::env::var("SEMANTIC_TIMEOUT_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .context("SEMANTIC_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_SEMANTIC_TIMEOUT_SECS,
        };

        let confidence_threshold = match std::env::var("CONFIDENCE_THRESHOLD") {
            Ok(v) => v
                .parse::<f32>()
                .context("CONFIDENCE_THRESHOLD must be a float in [0,1]")?,
            Err(_) => DEFAULT_CONFIDENCE_THRESHOLD,
        };

        Ok(Config {
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            extraction_model: require_env("EXTRACTION_MODEL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            semantic_timeout: Duration::from_secs(timeout_secs),
            confidence_threshold,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
