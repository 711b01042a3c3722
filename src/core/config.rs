use super::calculator::{DEFAULT_MARKET_TICKER, DEFAULT_RISK_FREE_TICKER};
use crate::providers::http_api::DEFAULT_TIMEOUT_SECS;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Tickers whose latest prices stand in for the risk-free rate and the
/// market return.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProxiesConfig {
    pub risk_free: String,
    pub market: String,
}

impl Default for ProxiesConfig {
    fn default() -> Self {
        ProxiesConfig {
            risk_free: DEFAULT_RISK_FREE_TICKER.to_string(),
            market: DEFAULT_MARKET_TICKER.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub proxies: ProxiesConfig,
}

impl AppConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        AppConfig {
            api: ApiConfig {
                base_url: base_url.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            proxies: ProxiesConfig::default(),
        }
    }

    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "finmodels", "finmodels")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
