use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Admin secret used when ADMIN_PASSWORD is not set. The gate it guards is
/// cosmetic, not a security boundary.
const DEFAULT_ADMIN_PASSWORD: &str = "yahavi2025";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: String,
    pub admin_password: String,
    pub mirror_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
            mirror_url: env::var("MIRROR_URL").ok(),
        })
    }
}
