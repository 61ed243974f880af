use crate::domain::simulation::profile::CpuProfile;
use rand::Rng;

/// Bounded random walk with transient spikes.
///
/// Spikes are drawn on top of the current baseline but never written back,
/// so a burst of spikes leaves the long-run curve where it was.
#[derive(Debug, Clone)]
pub struct CpuGenerator {
    base: f64,
    profile: CpuProfile,
}

impl CpuGenerator {
    pub fn new(profile: CpuProfile) -> Self {
        Self {
            base: profile.initial_base,
            profile,
        }
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn next_usage<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let roll: f64 = rng.random();
        self.advance(roll, rng)
    }

    /// Advance one tick with a pre-drawn branch roll in [0, 1).
    pub fn advance<R: Rng + ?Sized>(&mut self, roll: f64, rng: &mut R) -> f64 {
        let usage = if roll < self.profile.spike_probability {
            let excursion = self.base + self.profile.spike_magnitude.sample(rng);
            excursion.min(self.profile.spike_ceiling)
        } else {
            let step = self.profile.walk_step.sample(rng);
            self.base = (self.base + step).clamp(self.profile.bounds.lo, self.profile.bounds.hi);
            self.base + self.profile.jitter.sample(rng)
        };

        usage.clamp(0.0, 100.0)
    }
}
