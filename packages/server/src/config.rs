use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use verification::SecretString;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: SecretString,
    pub openai_base_url: Option<String>,
    pub openai_model: String,
    pub openai_embedding_model: String,
    /// `*` allows any origin
    pub cors_origins: Vec<String>,
    pub credibility_table_path: Option<String>,
    pub pacing_ms: u64,
    pub max_retries: u32,
    pub max_claims_per_article: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("OPENAI_API_KEY must be set")?;

        Ok(Self {
            port: parse_or(&lookup, "PORT", 8001)?,
            openai_api_key: SecretString::new(openai_api_key),
            openai_base_url: lookup("OPENAI_BASE_URL").filter(|url| !url.trim().is_empty()),
            openai_model: lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            openai_embedding_model: lookup("OPENAI_EMBEDDING_MODEL")
                .unwrap_or_else(|| "text-embedding-3-large".to_string()),
            cors_origins: lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            credibility_table_path: lookup("CREDIBILITY_TABLE_PATH"),
            pacing_ms: parse_or(&lookup, "VERIFY_PACING_MS", 500)?,
            max_retries: parse_or(&lookup, "VERIFY_MAX_RETRIES", 0)?,
            max_claims_per_article: parse_or(&lookup, "MAX_CLAIMS_PER_ARTICLE", 5)?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", key)),
        None => Ok(default),
    }
}
