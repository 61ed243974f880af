//! Observability configuration parsing from environment variables.
//!
//! This module handles console log format and optional JSON snapshot output.

use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Invalid LOG_FORMAT: {}. Must be 'pretty' or 'json'", s),
        }
    }
}

/// Observability environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ObservabilityEnvConfig {
    pub log_format: LogFormat,
    pub snapshot_json: bool,
    /// Print payloads to stdout instead of pushing them.
    pub dry_run: bool,
}

impl Default for ObservabilityEnvConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            snapshot_json: false,
            dry_run: false,
        }
    }
}

impl ObservabilityEnvConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            log_format: LogFormat::from_str(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            )?,
            snapshot_json: Self::parse_bool("SNAPSHOT_JSON", false),
            dry_run: Self::parse_bool("DRY_RUN", false),
        })
    }

    fn parse_bool(key: &str, default: bool) -> bool {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<bool>()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert!(LogFormat::from_str("xml").is_err());
    }
}
