use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Process configuration, read once at startup. Nothing else in the crate
/// touches the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub tokeninfo_url: String,
    pub token_audience: Option<String>,
    pub judge_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8081),
            database_url: env::var("DATABASE_URL").context("DATABASE_URL not set")?,
            tokeninfo_url: env::var("TOKENINFO_URL")
                .unwrap_or_else(|_| DEFAULT_TOKENINFO_URL.into()),
            token_audience: env::var("TOKEN_AUDIENCE").ok(),
            judge_url: env::var("JUDGE_URL").ok(),
        })
    }
}
