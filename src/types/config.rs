//! Configuration for Bateria.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{BateriaError, BateriaResult};

/// Main configuration for Bateria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Result cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Analysis engine settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Result cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of entries per operation.
    #[serde(default = "default_cache_max_size")]
    pub max_size: usize,

    /// Entry time to live in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// Creates a cache configuration with the given limits.
    pub fn new(max_size: usize, ttl_secs: u64) -> Self {
        Self {
            enabled: true,
            max_size,
            ttl_secs,
        }
    }

    /// Entry time to live as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Rejects limits the cache cannot honour.
    pub fn validate(&self) -> BateriaResult<()> {
        if self.max_size == 0 {
            return Err(BateriaError::config("cache.max_size must be greater than 0"));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size: default_cache_max_size(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_max_size() -> usize {
    1000
}

fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

/// Analysis engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of standard deviations from the mean beyond which a
    /// measurement is reported as an anomaly.
    #[serde(default = "default_outlier_multiplier")]
    pub outlier_multiplier: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            outlier_multiplier: default_outlier_multiplier(),
        }
    }
}

fn default_outlier_multiplier() -> f64 {
    // With population stddev a point in a series of n can sit at most
    // sqrt(n - 1) deviations away, so small test batches need k < sqrt(2).
    1.0
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> BateriaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.cache.validate()?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> BateriaResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            cache: CacheConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }

    /// Tries to load configuration from current directory or uses default.
    pub fn load_or_default() -> Self {
        Self::load("bateria.toml").unwrap_or_else(|_| Self::default_config())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
