//! Model artifact configuration parsing from environment variables.

use anyhow::Result;
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "trained_model.sav";

/// Model environment configuration
#[derive(Debug, Clone)]
pub struct ModelEnvConfig {
    pub model_path: PathBuf,
    pub model_sha256: Option<String>,
}

impl Default for ModelEnvConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_sha256: None,
        }
    }
}

impl ModelEnvConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_path = lookup("PRICECAST_MODEL_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        let model_sha256 = match lookup("PRICECAST_MODEL_SHA256") {
            Some(v) if !v.trim().is_empty() => Some(parse_sha256(&v)?),
            _ => None,
        };

        Ok(Self {
            model_path,
            model_sha256,
        })
    }
}

/// Validates a hex SHA-256 digest and returns it lowercased.
pub fn parse_sha256(value: &str) -> Result<String> {
    let digest = value.trim().to_lowercase();
    if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!(
            "Invalid PRICECAST_MODEL_SHA256: expected 64 hex characters, got '{}'",
            value
        );
    }
    Ok(digest)
}
