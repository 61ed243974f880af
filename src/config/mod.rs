//! Configuration module for metricsim.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Pushgateway, Simulation, and Observability.

mod observability_config;
mod pushgateway_config;
mod simulation_config;

pub use observability_config::{LogFormat, ObservabilityEnvConfig};
pub use pushgateway_config::PushgatewayEnvConfig;
pub use simulation_config::{SimulationEnvConfig, load_profile};

use crate::application::system::LoopSettings;
use anyhow::{Context, Result};
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub pushgateway: PushgatewayEnvConfig,
    pub simulation: SimulationEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            pushgateway: PushgatewayEnvConfig::from_env()
                .context("Failed to load Pushgateway config")?,
            simulation: SimulationEnvConfig::from_env()
                .context("Failed to load simulation config")?,
            observability: ObservabilityEnvConfig::from_env()
                .context("Failed to load observability config")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()
    }

    pub fn loop_settings(&self) -> LoopSettings {
        LoopSettings {
            interval: Duration::from_secs(self.simulation.interval_secs),
            startup_delay: Duration::from_secs(self.simulation.startup_delay_secs),
            max_ticks: self.simulation.max_ticks,
        }
    }
}
