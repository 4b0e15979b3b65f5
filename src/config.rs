use anyhow::{Context, Result};
use compute::ForecastDataset;
use moka::future::Cache;
use secrecy::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::llm;
use crate::schemas::AppState;

/// Base name of the optional configuration file (`bloodcast.toml`, `.yaml`, ...).
pub const CONFIG_FILE: &str = "bloodcast";

/// Prefix of configuration environment variables, e.g. `BLOODCAST__SERVER__BIND_ADDRESS`.
pub const ENV_PREFIX: &str = "BLOODCAST";

/// Application configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Format: IP:PORT
    pub bind_address: String,
    /// Path of the precomputed forecast dataset
    pub data_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            data_path: PathBuf::from("data/forecasts.json"),
        }
    }
}

/// Language model (OpenAI-compatible chat completions) settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Without a key the report and chat endpoints answer 503
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            timeout_secs: 120,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Supply suggestion cache settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_capacity: u64,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1000,
            ttl_secs: 300,
        }
    }
}

impl AppConfig {
    /// Load configuration
    ///
    /// Sources, later ones winning:
    /// 1. built-in defaults
    /// 2. optional `bloodcast.toml` in the working directory
    /// 3. `BLOODCAST__*` environment variables (`__` separates nested keys)
    /// 4. `OPENAI_API_KEY` when no key was configured otherwise
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if config.llm.api_key.is_none() {
            config.llm.api_key = std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(Secret::new);
        }

        Ok(config)
    }

    /// Applies command line overrides.
    pub fn with_overrides(mut self, bind_address: Option<String>, data_path: Option<PathBuf>) -> Self {
        if let Some(bind_address) = bind_address {
            self.server.bind_address = bind_address;
        }
        if let Some(data_path) = data_path {
            self.server.data_path = data_path;
        }
        self
    }
}

/// Load the forecast dataset from `path`
pub fn load_dataset(path: &Path) -> Result<ForecastDataset> {
    ForecastDataset::load(path)
        .with_context(|| format!("Unable to load forecast dataset from {}", path.display()))
}

/// Initialize application state from the loaded configuration
pub fn initialize_app_state(config: AppConfig) -> Result<AppState> {
    let dataset = load_dataset(&config.server.data_path)?;
    let model = llm::from_config(config.llm)?;

    let cache = Cache::builder()
        .max_capacity(config.cache.max_capacity)
        .time_to_live(Duration::from_secs(config.cache.ttl_secs))
        .build();

    Ok(AppState {
        dataset: Arc::new(dataset),
        model,
        cache,
    })
}
