//! Configuration module for Pricecast.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Model artifact and Logging.

mod logging_config;
mod model_config;

pub use logging_config::{LogFormat, LoggingEnvConfig};
pub use model_config::{DEFAULT_MODEL_PATH, ModelEnvConfig, parse_sha256};

use anyhow::{Context, Result};
use std::env;

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub model: ModelEnvConfig,
    pub logging: LoggingEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = ModelEnvConfig::from_lookup(&lookup).context("Failed to load model config")?;
        let logging =
            LoggingEnvConfig::from_lookup(&lookup).context("Failed to load logging config")?;
        Ok(Self { model, logging })
    }
}
