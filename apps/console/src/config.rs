use anyhow::{Context, Result};

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Console configuration loaded from environment variables.
/// The base URL is fixed for the whole session once loaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let raw = std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Ok(Config {
            api_base_url: normalize_base_url(&raw)
                .with_context(|| format!("API_BASE_URL '{raw}' is not an http(s) URL"))?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Strips trailing slashes so request paths can always start with `/`.
fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        None
    }
}
