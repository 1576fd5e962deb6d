use serde::Deserialize;

use crate::services::recommender::{DEFAULT_CANDIDATE_CAP, DEFAULT_RECOMMENDATIONS};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Primary movie catalog (CSV)
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Curated top-rated catalog (CSV)
    #[serde(default = "default_top_rated_path")]
    pub top_rated_path: String,

    /// Category table (JSON); the built-in table is used when unset
    #[serde(default)]
    pub categories_path: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Ids returned when a request does not ask for a specific count
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Filtered records considered for sampling
    #[serde(default = "default_candidate_cap")]
    pub candidate_cap: usize,

    /// Fixed sampling seed for reproducible responses
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_movies_path() -> String {
    "movies.csv".to_string()
}

fn default_top_rated_path() -> String {
    "Top_rated.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_recommendation_count() -> usize {
    DEFAULT_RECOMMENDATIONS
}

fn default_candidate_cap() -> usize {
    DEFAULT_CANDIDATE_CAP
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.candidate_cap == 0 {
            anyhow::bail!("Failed to load config: CANDIDATE_CAP must be at least 1");
        }

        Ok(config)
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
