use crate::domain::errors::ProfileError;
use crate::domain::metrics::MetricSnapshot;
use crate::domain::simulation::{
    CpuGenerator, MemoryGenerator, SimulationProfile, SimulatorState, TrafficGenerator,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Single-owner metric generator.
///
/// Holds the evolving state of the three models plus the RNG driving them.
/// `tick` is the only mutator; there is no interior mutability and no
/// sharing, so the simulator is moved into whatever loop drives it.
pub struct MetricSimulator<R: Rng = StdRng> {
    cpu: CpuGenerator,
    memory: MemoryGenerator,
    traffic: TrafficGenerator,
    rng: R,
}

impl MetricSimulator<StdRng> {
    /// Reproducible simulator for a fixed seed.
    pub fn seeded(profile: SimulationProfile, seed: u64) -> Result<Self, ProfileError> {
        Self::new(profile, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(profile: SimulationProfile) -> Result<Self, ProfileError> {
        Self::new(profile, StdRng::from_os_rng())
    }
}

impl<R: Rng> MetricSimulator<R> {
    pub fn new(profile: SimulationProfile, rng: R) -> Result<Self, ProfileError> {
        profile.validate()?;

        Ok(Self {
            cpu: CpuGenerator::new(profile.cpu),
            memory: MemoryGenerator::new(profile.memory),
            traffic: TrafficGenerator::new(profile.traffic)?,
            rng,
        })
    }

    /// Produce the snapshot for one tick at the given wall-clock hour.
    pub fn tick(&mut self, hour: u32) -> MetricSnapshot {
        let cpu_usage_percent = self.cpu.next_usage(&mut self.rng);
        let memory_usage_percent = self.memory.next_usage(&mut self.rng);
        let totals = self.traffic.next_totals(hour, &mut self.rng);

        MetricSnapshot {
            cpu_usage_percent,
            memory_usage_percent,
            request_count_total: totals.requests,
            error_count_total: totals.errors,
        }
    }

    pub fn state(&self) -> SimulatorState {
        let totals = self.traffic.totals();
        SimulatorState {
            cpu_base: self.cpu.base(),
            memory_base: self.memory.base(),
            request_count: totals.requests,
            error_count: totals.errors,
        }
    }

    /// Mutable access to the individual models, for driving forced branches.
    pub fn parts_mut(
        &mut self,
    ) -> (
        &mut CpuGenerator,
        &mut MemoryGenerator,
        &mut TrafficGenerator,
        &mut R,
    ) {
        (
            &mut self.cpu,
            &mut self.memory,
            &mut self.traffic,
            &mut self.rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let simulator = MetricSimulator::seeded(SimulationProfile::default(), 1).unwrap();
        assert_eq!(
            simulator.state(),
            SimulatorState {
                cpu_base: 20.0,
                memory_base: 30.0,
                request_count: 0,
                error_count: 0,
            }
        );
    }

    #[test]
    fn test_same_seed_same_series() {
        let mut a = MetricSimulator::seeded(SimulationProfile::default(), 1234).unwrap();
        let mut b = MetricSimulator::seeded(SimulationProfile::default(), 1234).unwrap();

        for hour in 0..24 {
            assert_eq!(a.tick(hour), b.tick(hour));
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let mut profile = SimulationProfile::default();
        profile.traffic.business_rate = -1.0;
        assert!(MetricSimulator::seeded(profile, 1).is_err());
    }

    #[test]
    fn test_snapshot_mirrors_counters() {
        let mut simulator = MetricSimulator::seeded(SimulationProfile::default(), 8).unwrap();
        let snapshot = simulator.tick(12);
        let state = simulator.state();

        assert_eq!(snapshot.request_count_total, state.request_count);
        assert_eq!(snapshot.error_count_total, state.error_count);
    }
}
