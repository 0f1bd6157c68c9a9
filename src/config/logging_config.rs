//! Logging configuration parsing from environment variables.

use anyhow::Result;
use std::str::FromStr;

/// Output style of the stdout fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => anyhow::bail!("Invalid LOG_FORMAT: {}. Must be 'pretty' or 'compact'", s),
        }
    }
}

/// Logging environment configuration
#[derive(Debug, Clone)]
pub struct LoggingEnvConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingEnvConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingEnvConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup("LOG_LEVEL")
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "info".to_string());

        let format = match lookup("LOG_FORMAT") {
            Some(v) if !v.trim().is_empty() => LogFormat::from_str(v.trim())?,
            _ => LogFormat::Pretty,
        };

        Ok(Self { level, format })
    }
}
