use serde::Deserialize;
use std::time::Duration;

use crate::services::DEFAULT_LIMIT;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Remote ranking service base URL
    pub ranking_api_url: String,

    /// Bearer token for the remote ranking service
    #[serde(default)]
    pub ranking_api_key: Option<String>,

    /// Upper bound on one remote ranking call, in milliseconds
    #[serde(default = "default_ranking_timeout_ms")]
    pub ranking_timeout_ms: u64,

    /// Number of recommendations returned when a request does not ask for a limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest limit a request may ask for
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Path to a JSON array of catalog products
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_ranking_timeout_ms() -> u64 {
    3000
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_max_limit() -> usize {
    20
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn ranking_timeout(&self) -> Duration {
        Duration::from_millis(self.ranking_timeout_ms)
    }
}
