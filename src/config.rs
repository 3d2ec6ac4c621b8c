use serde::Deserialize;

use crate::services::ScoringWeights;

/// Where the catalog lives
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CatalogBackend {
    /// Volatile, process-local list
    Memory,
    /// PostgreSQL via `DATABASE_URL`
    Postgres,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_catalog_backend")]
    pub catalog_backend: CatalogBackend,

    /// PostgreSQL connection URL, required for the postgres backend
    #[serde(default)]
    pub database_url: Option<String>,

    /// Redis connection URL; enables the catalog cache when set
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Seconds a cached catalog snapshot stays valid
    #[serde(default = "default_catalog_cache_ttl")]
    pub catalog_cache_ttl: u64,

    /// Load the starter resources into an empty in-memory catalog
    #[serde(default = "default_true")]
    pub seed_catalog: bool,

    /// Requests allowed per global window (0 disables)
    #[serde(default = "default_global_rate_limit")]
    pub global_rate_limit: u32,

    #[serde(default = "default_global_rate_window_secs")]
    pub global_rate_window_secs: u64,

    /// Write requests allowed per write window (0 disables)
    #[serde(default = "default_write_rate_limit")]
    pub write_rate_limit: u32,

    #[serde(default = "default_write_rate_window_secs")]
    pub write_rate_window_secs: u64,

    #[serde(default = "default_tag_weight")]
    pub score_tag_weight: u32,

    #[serde(default = "default_title_weight")]
    pub score_title_weight: u32,

    #[serde(default = "default_description_weight")]
    pub score_description_weight: u32,

    #[serde(default = "default_beginner_bonus")]
    pub score_beginner_bonus: u32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9000
}

fn default_catalog_backend() -> CatalogBackend {
    CatalogBackend::Memory
}

fn default_catalog_cache_ttl() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_global_rate_limit() -> u32 {
    100
}

fn default_global_rate_window_secs() -> u64 {
    15 * 60
}

fn default_write_rate_limit() -> u32 {
    10
}

fn default_write_rate_window_secs() -> u64 {
    60
}

fn default_tag_weight() -> u32 {
    ScoringWeights::default().tag_weight
}

fn default_title_weight() -> u32 {
    ScoringWeights::default().title_weight
}

fn default_description_weight() -> u32 {
    ScoringWeights::default().description_weight
}

fn default_beginner_bonus() -> u32 {
    ScoringWeights::default().beginner_bonus
}

impl Config {
    /// Load configuration from `.env` (if present) and the environment
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
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.catalog_backend == CatalogBackend::Postgres && self.database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required when CATALOG_BACKEND=postgres");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights {
            tag_weight: self.score_tag_weight,
            title_weight: self.score_title_weight,
            description_weight: self.score_description_weight,
            beginner_bonus: self.score_beginner_bonus,
        }
    }
}
