use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_ENV: &str = "RANKMETRICS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Ranking metric parameters used by `RankingMetrics::evaluate`
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Cut-off for precision@k.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Minimum score for a top-k positive to count as a true positive.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            threshold: default_threshold(),
        }
    }
}

fn default_top_k() -> usize {
    5
}

fn default_threshold() -> f64 {
    0.5
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in RANKMETRICS_CONFIG environment variable
    /// 2. ./config.toml in current directory (defaults are used if it is absent)
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let config_path = match std::env::var(CONFIG_ENV) {
            Ok(path) => PathBuf::from(path),
            Err(_) => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !path.exists() {
                    log::debug!("No {} found, using default metric settings", DEFAULT_CONFIG_PATH);
                    return Ok(Config::default());
                }
                path
            }
        };

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config file: {}", config_path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !self.metrics.threshold.is_finite() {
            anyhow::bail!(
                "metrics.threshold must be a finite number, got {}",
                self.metrics.threshold
            );
        }
        Ok(())
    }
}
