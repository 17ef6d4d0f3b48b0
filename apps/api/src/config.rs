use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSONL corpus the catalog is built from at startup.
    pub jobs_path: String,
    /// Snapshot file for search keyword counts.
    pub keywords_path: String,
    /// Token for the hosted zero-shot classifier. Optional: plain search and
    /// lexical matching work without it; the classify endpoint fails upstream.
    pub hf_api_token: Option<String>,
    /// Quiet period before keyword counts are flushed to disk.
    pub keyword_flush_ms: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            jobs_path: std::env::var("JOBS_FILE")
                .unwrap_or_else(|_| "./data/jobs.jsonl".to_string()),
            keywords_path: std::env::var("SEARCH_KEYWORDS_FILE")
                .unwrap_or_else(|_| "./data/search_keywords.json".to_string()),
            hf_api_token: std::env::var("HUGGINGFACE_API_TOKEN").ok(),
            keyword_flush_ms: std::env::var("KEYWORD_FLUSH_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse::<u64>()
                .context("KEYWORD_FLUSH_MS must be a number of milliseconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
