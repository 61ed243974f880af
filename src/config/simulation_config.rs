//! Generator cadence and simulation profile configuration.

use crate::domain::simulation::SimulationProfile;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationEnvConfig {
    pub interval_secs: u64,
    pub startup_delay_secs: u64,
    /// Fixed RNG seed for reproducible series; OS entropy when unset.
    pub seed: Option<u64>,
    /// Pin the diurnal model to one hour instead of the wall clock.
    pub fixed_hour: Option<u32>,
    pub max_ticks: Option<u64>,
    pub profile_path: Option<PathBuf>,
}

impl Default for SimulationEnvConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            startup_delay_secs: 30,
            seed: None,
            fixed_hour: None,
            max_ticks: None,
            profile_path: None,
        }
    }
}

impl SimulationEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            interval_secs: Self::parse_u64("GENERATOR_INTERVAL_SECS", defaults.interval_secs)?,
            startup_delay_secs: Self::parse_u64(
                "GENERATOR_STARTUP_DELAY_SECS",
                defaults.startup_delay_secs,
            )?,
            seed: Self::parse_optional("GENERATOR_SEED")?,
            fixed_hour: Self::parse_optional("GENERATOR_FIXED_HOUR")?,
            max_ticks: Self::parse_optional("GENERATOR_MAX_TICKS")?,
            profile_path: env::var("SIMULATION_PROFILE").ok().map(PathBuf::from),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            anyhow::bail!("Generator interval must be at least 1 second");
        }
        if let Some(hour) = self.fixed_hour.filter(|hour| *hour > 23) {
            anyhow::bail!("Fixed hour must be within 0..=23, got {}", hour);
        }
        Ok(())
    }

    /// Load the configured profile, or the defaults when none is set.
    pub fn load_profile(&self) -> Result<SimulationProfile> {
        match &self.profile_path {
            Some(path) => load_profile(path),
            None => Ok(SimulationProfile::default()),
        }
    }

    fn parse_u64(key: &str, default: u64) -> Result<u64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<u64>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_optional<T>(key: &str) -> Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match env::var(key) {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .context(format!("Failed to parse {}", key)),
            _ => Ok(None),
        }
    }
}

pub fn load_profile(path: &Path) -> Result<SimulationProfile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read simulation profile {}", path.display()))?;
    let profile: SimulationProfile = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse simulation profile {}", path.display()))?;
    profile
        .validate()
        .with_context(|| format!("Invalid simulation profile {}", path.display()))?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_interval() {
        let config = SimulationEnvConfig {
            interval_secs: 0,
            ..SimulationEnvConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_hour_past_midnight() {
        let config = SimulationEnvConfig {
            fixed_hour: Some(24),
            ..SimulationEnvConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_profile_without_path() {
        let config = SimulationEnvConfig::default();
        assert_eq!(config.load_profile().unwrap(), SimulationProfile::default());
    }

    #[test]
    fn test_load_profile_from_file() {
        let path = env::temp_dir().join(format!("metricsim-profile-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[memory]\nreset_probability = 0.2\n\n[traffic]\noff_hours_rate = 3.0\n",
        )
        .unwrap();

        let profile = load_profile(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(profile.memory.reset_probability, 0.2);
        assert_eq!(profile.traffic.off_hours_rate, 3.0);
        assert_eq!(profile.cpu, SimulationProfile::default().cpu);
    }

    #[test]
    fn test_load_profile_rejects_invalid_values() {
        let path = env::temp_dir().join(format!(
            "metricsim-bad-profile-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[cpu]\nspike_probability = 2.0\n").unwrap();

        let result = load_profile(&path);
        std::fs::remove_file(&path).ok();

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("cpu.spike_probability"), "{}", message);
    }

    #[test]
    fn test_missing_profile_file() {
        assert!(load_profile(Path::new("/nonexistent/metricsim.toml")).is_err());
    }
}
