//! Pushgateway configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Collector endpoint configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PushgatewayEnvConfig {
    pub url: String,
    pub job: String,
    pub instance: String,
    pub timeout_ms: u64,
}

impl Default for PushgatewayEnvConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9091".to_string(),
            job: "system_monitor".to_string(),
            instance: "demo_app".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl PushgatewayEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            url: env::var("PUSHGATEWAY_URL").unwrap_or(defaults.url),
            job: env::var("PUSHGATEWAY_JOB").unwrap_or(defaults.job),
            instance: env::var("PUSHGATEWAY_INSTANCE").unwrap_or(defaults.instance),
            timeout_ms: env::var("PUSHGATEWAY_TIMEOUT_MS")
                .unwrap_or_else(|_| defaults.timeout_ms.to_string())
                .parse::<u64>()
                .context("Failed to parse PUSHGATEWAY_TIMEOUT_MS")?,
        })
    }
}
