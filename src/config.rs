/*!
 * Pool Configuration
 * Capacity and pressure thresholds, loadable from JSON or environment
 */

use crate::core::limits::{
    DEFAULT_CRITICAL_THRESHOLD, DEFAULT_POOL_CAPACITY, DEFAULT_WARNING_THRESHOLD,
};
use crate::core::types::Size;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the arena capacity
pub const ENV_CAPACITY: &str = "POOL_CAPACITY";
/// Environment variable overriding the warning threshold (0.0-1.0)
pub const ENV_WARNING_THRESHOLD: &str = "POOL_WARNING_THRESHOLD";
/// Environment variable overriding the critical threshold (0.0-1.0)
pub const ENV_CRITICAL_THRESHOLD: &str = "POOL_CRITICAL_THRESHOLD";

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum ConfigError {
    #[error("Pool capacity must be positive")]
    #[diagnostic(
        code(config::zero_capacity),
        help("Set POOL_CAPACITY or `capacity` to a number of bytes greater than zero.")
    )]
    ZeroCapacity,

    #[error("Invalid thresholds: warning {warning}, critical {critical}")]
    #[diagnostic(
        code(config::invalid_thresholds),
        help("Thresholds are usage ratios and must satisfy 0 < warning <= critical <= 1.")
    )]
    InvalidThresholds { warning: f64, critical: f64 },

    #[error("Invalid value for {key}: {value:?}")]
    #[diagnostic(code(config::invalid_env))]
    InvalidEnv { key: &'static str, value: String },

    #[error("Malformed configuration: {0}")]
    #[diagnostic(code(config::parse))]
    Parse(String),
}

/// Pool configuration.
///
/// Capacity is fixed for the lifetime of a pool and applies to both arenas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Bytes per arena
    pub capacity: Size,
    /// Usage ratio above which inserts log a pressure warning
    pub warning_threshold: f64,
    /// Usage ratio reported as critical
    pub critical_threshold: f64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_POOL_CAPACITY,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
        }
    }
}

impl PoolConfig {
    pub fn with_capacity(mut self, capacity: Size) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_thresholds(mut self, warning: f64, critical: f64) -> Self {
        self.warning_threshold = warning;
        self.critical_threshold = critical;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let (warning, critical) = (self.warning_threshold, self.critical_threshold);
        if !(warning > 0.0 && warning <= critical && critical <= 1.0) {
            return Err(ConfigError::InvalidThresholds { warning, critical });
        }
        Ok(())
    }

    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `POOL_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_CAPACITY) {
            config.capacity = parse_env(ENV_CAPACITY, value)?;
        }
        if let Some(value) = lookup(ENV_WARNING_THRESHOLD) {
            config.warning_threshold = parse_env(ENV_WARNING_THRESHOLD, value)?;
        }
        if let Some(value) = lookup(ENV_CRITICAL_THRESHOLD) {
            config.critical_threshold = parse_env(ENV_CRITICAL_THRESHOLD, value)?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}
