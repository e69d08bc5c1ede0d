use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::sequence::CounterPolicy;

/// Application configuration loaded from environment variables.
/// Everything has a default; without an API key questions come from the
/// built-in bank.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub assets_dir: PathBuf,
    pub output_dir: PathBuf,
    pub counter_policy: CounterPolicy,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let posts = var_or("QUIZ_POSTS_PER_DAY", "2");
        let counter_policy = posts
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(CounterPolicy::from_posts_per_day)
            .with_context(|| format!("QUIZ_POSTS_PER_DAY must be 1 or 2, got '{posts}'"))?;

        Ok(Config {
            openai_api_key: lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
            openai_base_url: var_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            openai_model: var_or("OPENAI_MODEL", DEFAULT_MODEL),
            assets_dir: PathBuf::from(var_or("QUIZ_ASSETS_DIR", "assets")),
            output_dir: PathBuf::from(var_or("QUIZ_OUTPUT_DIR", "output")),
            counter_policy,
            rust_log: var_or("RUST_LOG", "info"),
        })
    }
}
