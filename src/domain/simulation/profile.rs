//! Tunable constants of the synthetic metric model.
//!
//! `SimulationProfile::default()` reproduces the stock demo behaviour. Every
//! section can be overridden from a TOML file; keys left out keep their
//! defaults, unknown keys are rejected.

use crate::domain::errors::ProfileError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed interval sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniformRange {
    pub lo: f64,
    pub hi: f64,
}

impl UniformRange {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.lo..=self.hi)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }

    fn validate(&self, field: &'static str) -> Result<(), ProfileError> {
        if !self.lo.is_finite() || !self.hi.is_finite() || self.lo > self.hi {
            return Err(ProfileError::InvertedRange {
                field,
                lo: self.lo,
                hi: self.hi,
            });
        }
        Ok(())
    }
}

/// Inclusive span of hours, e.g. 9..=17.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HourBand {
    pub start: u32,
    pub end: u32,
}

impl HourBand {
    pub fn contains(&self, hour: u32) -> bool {
        (self.start..=self.end).contains(&hour)
    }

    fn validate(&self, field: &'static str) -> Result<(), ProfileError> {
        if self.start > self.end || self.end > 23 {
            return Err(ProfileError::InvalidHourBand {
                field,
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CpuProfile {
    pub initial_base: f64,
    /// Walk limits for the baseline.
    pub bounds: UniformRange,
    pub spike_probability: f64,
    pub spike_magnitude: UniformRange,
    pub spike_ceiling: f64,
    pub walk_step: UniformRange,
    pub jitter: UniformRange,
}

impl Default for CpuProfile {
    fn default() -> Self {
        Self {
            initial_base: 20.0,
            bounds: UniformRange::new(5.0, 80.0),
            spike_probability: 0.10,
            spike_magnitude: UniformRange::new(30.0, 50.0),
            spike_ceiling: 95.0,
            walk_step: UniformRange::new(-5.0, 5.0),
            jitter: UniformRange::new(-3.0, 3.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryProfile {
    pub initial_base: f64,
    pub bounds: UniformRange,
    /// Chance per tick of a simulated garbage collection.
    pub reset_probability: f64,
    pub reset_level: UniformRange,
    pub walk_step: UniformRange,
    pub jitter: UniformRange,
}

impl Default for MemoryProfile {
    fn default() -> Self {
        Self {
            initial_base: 30.0,
            bounds: UniformRange::new(10.0, 85.0),
            reset_probability: 0.05,
            reset_level: UniformRange::new(15.0, 25.0),
            walk_step: UniformRange::new(-1.0, 2.0),
            jitter: UniformRange::new(-2.0, 2.0),
        }
    }
}

/// Time-of-day load band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiurnalBand {
    Business,
    Evening,
    OffHours,
}

impl DiurnalBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiurnalBand::Business => "business",
            DiurnalBand::Evening => "evening",
            DiurnalBand::OffHours => "off-hours",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrafficProfile {
    pub business_hours: HourBand,
    pub evening_hours: HourBand,
    /// Poisson means of new requests per tick.
    pub business_rate: f64,
    pub evening_rate: f64,
    pub off_hours_rate: f64,
    pub error_rate: UniformRange,
}

impl Default for TrafficProfile {
    fn default() -> Self {
        Self {
            business_hours: HourBand { start: 9, end: 17 },
            evening_hours: HourBand { start: 18, end: 22 },
            business_rate: 25.0,
            evening_rate: 15.0,
            off_hours_rate: 10.0,
            error_rate: UniformRange::new(0.02, 0.05),
        }
    }
}

impl TrafficProfile {
    /// Business hours win if the two bands overlap. Hours outside 0..=23
    /// fall through to off-hours.
    pub fn band_for_hour(&self, hour: u32) -> DiurnalBand {
        if self.business_hours.contains(hour) {
            DiurnalBand::Business
        } else if self.evening_hours.contains(hour) {
            DiurnalBand::Evening
        } else {
            DiurnalBand::OffHours
        }
    }

    pub fn rate_for(&self, band: DiurnalBand) -> f64 {
        match band {
            DiurnalBand::Business => self.business_rate,
            DiurnalBand::Evening => self.evening_rate,
            DiurnalBand::OffHours => self.off_hours_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationProfile {
    pub cpu: CpuProfile,
    pub memory: MemoryProfile,
    pub traffic: TrafficProfile,
}

impl SimulationProfile {
    pub fn validate(&self) -> Result<(), ProfileError> {
        let cpu = &self.cpu;
        check_probability("cpu.spike_probability", cpu.spike_probability)?;
        cpu.bounds.validate("cpu.bounds")?;
        cpu.spike_magnitude.validate("cpu.spike_magnitude")?;
        cpu.walk_step.validate("cpu.walk_step")?;
        cpu.jitter.validate("cpu.jitter")?;
        check_within("cpu.initial_base", cpu.initial_base, &cpu.bounds)?;
        if !cpu.spike_ceiling.is_finite() {
            return Err(ProfileError::OutOfBounds {
                field: "cpu.spike_ceiling",
                value: cpu.spike_ceiling,
                lo: 0.0,
                hi: 100.0,
            });
        }

        let memory = &self.memory;
        check_probability("memory.reset_probability", memory.reset_probability)?;
        memory.bounds.validate("memory.bounds")?;
        memory.reset_level.validate("memory.reset_level")?;
        memory.walk_step.validate("memory.walk_step")?;
        memory.jitter.validate("memory.jitter")?;
        check_within("memory.initial_base", memory.initial_base, &memory.bounds)?;

        let traffic = &self.traffic;
        traffic.business_hours.validate("traffic.business_hours")?;
        traffic.evening_hours.validate("traffic.evening_hours")?;
        for band in [
            DiurnalBand::Business,
            DiurnalBand::Evening,
            DiurnalBand::OffHours,
        ] {
            let lambda = traffic.rate_for(band);
            if !(lambda.is_finite() && lambda > 0.0) {
                return Err(ProfileError::InvalidRequestRate {
                    band: band.as_str(),
                    lambda,
                });
            }
        }
        traffic.error_rate.validate("traffic.error_rate")?;
        check_probability("traffic.error_rate.lo", traffic.error_rate.lo)?;
        check_probability("traffic.error_rate.hi", traffic.error_rate.hi)?;

        Ok(())
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ProfileError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ProfileError::InvalidProbability { field, value });
    }
    Ok(())
}

fn check_within(field: &'static str, value: f64, bounds: &UniformRange) -> Result<(), ProfileError> {
    if !bounds.contains(value) {
        return Err(ProfileError::OutOfBounds {
            field,
            value,
            lo: bounds.lo,
            hi: bounds.hi,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        assert_eq!(SimulationProfile::default().validate(), Ok(()));
    }

    #[test]
    fn test_band_for_hour() {
        let traffic = TrafficProfile::default();
        assert_eq!(traffic.band_for_hour(9), DiurnalBand::Business);
        assert_eq!(traffic.band_for_hour(17), DiurnalBand::Business);
        assert_eq!(traffic.band_for_hour(18), DiurnalBand::Evening);
        assert_eq!(traffic.band_for_hour(22), DiurnalBand::Evening);
        assert_eq!(traffic.band_for_hour(23), DiurnalBand::OffHours);
        assert_eq!(traffic.band_for_hour(0), DiurnalBand::OffHours);
        assert_eq!(traffic.band_for_hour(8), DiurnalBand::OffHours);
        assert_eq!(traffic.band_for_hour(42), DiurnalBand::OffHours);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let mut profile = SimulationProfile::default();
        profile.cpu.spike_probability = 1.5;
        assert_eq!(
            profile.validate(),
            Err(ProfileError::InvalidProbability {
                field: "cpu.spike_probability",
                value: 1.5
            })
        );
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut profile = SimulationProfile::default();
        profile.memory.walk_step = UniformRange::new(2.0, -1.0);
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::InvertedRange {
                field: "memory.walk_step",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_initial_base_outside_bounds() {
        let mut profile = SimulationProfile::default();
        profile.cpu.initial_base = 90.0;
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::OutOfBounds {
                field: "cpu.initial_base",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let mut profile = SimulationProfile::default();
        profile.traffic.off_hours_rate = 0.0;
        assert_eq!(
            profile.validate(),
            Err(ProfileError::InvalidRequestRate {
                band: "off-hours",
                lambda: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_error_rate_above_one() {
        let mut profile = SimulationProfile::default();
        profile.traffic.error_rate = UniformRange::new(0.5, 1.2);
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::InvalidProbability {
                field: "traffic.error_rate.hi",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_hour_band_past_midnight() {
        let mut profile = SimulationProfile::default();
        profile.traffic.evening_hours = HourBand { start: 18, end: 24 };
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::InvalidHourBand { .. })
        ));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let profile: SimulationProfile = toml::from_str(
            r#"
            [cpu]
            spike_probability = 0.25

            [traffic]
            business_rate = 40.0
            error_rate = { lo = 0.01, hi = 0.02 }
            "#,
        )
        .expect("profile should parse");

        assert_eq!(profile.cpu.spike_probability, 0.25);
        assert_eq!(profile.cpu.initial_base, 20.0);
        assert_eq!(profile.traffic.business_rate, 40.0);
        assert_eq!(profile.traffic.evening_rate, 15.0);
        assert_eq!(profile.traffic.error_rate, UniformRange::new(0.01, 0.02));
        assert_eq!(profile.memory, MemoryProfile::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: Result<SimulationProfile, _> = toml::from_str(
            r#"
            [cpu]
            spike_chance = 0.25
            "#,
        );
        assert!(result.is_err());
    }
}
