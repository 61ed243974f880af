use crate::domain::simulation::profile::MemoryProfile;
use rand::Rng;

/// Upward-biased walk with occasional drops, a sawtooth over long runs.
///
/// Unlike CPU the jittered reading is not clamped, so it can sit a couple of
/// points outside the baseline bounds.
#[derive(Debug, Clone)]
pub struct MemoryGenerator {
    base: f64,
    profile: MemoryProfile,
}

impl MemoryGenerator {
    pub fn new(profile: MemoryProfile) -> Self {
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
        if roll < self.profile.reset_probability {
            self.base = self.profile.reset_level.sample(rng);
        } else {
            let growth = self.profile.walk_step.sample(rng);
            self.base = (self.base + growth).clamp(self.profile.bounds.lo, self.profile.bounds.hi);
        }

        self.base + self.profile.jitter.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_reset_lands_in_low_band() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut memory = MemoryGenerator::new(MemoryProfile::default());

        for _ in 0..500 {
            let usage = memory.advance(0.01, &mut rng);
            assert!((15.0..=25.0).contains(&memory.base()));
            assert!(
                (13.0..=27.0).contains(&usage),
                "Reset usage {} out of bounds [13, 27]",
                usage
            );
        }
    }

    #[test]
    fn test_growth_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut memory = MemoryGenerator::new(MemoryProfile::default());

        for _ in 0..5_000 {
            let before = memory.base();
            let usage = memory.advance(0.5, &mut rng);
            let after = memory.base();

            assert!((10.0..=85.0).contains(&after));
            assert!(after - before <= 2.0 + 1e-9);
            assert!(before - after <= 1.0 + 1e-9);
            assert!((8.0..=87.0).contains(&usage));
        }
    }

    #[test]
    fn test_growth_creeps_upward() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut memory = MemoryGenerator::new(MemoryProfile::default());

        // Mean step is +0.5, so 40 ticks without a reset should climb well past the start.
        for _ in 0..40 {
            memory.advance(0.99, &mut rng);
        }
        assert!(memory.base() > 30.0);
    }

    #[test]
    fn test_reading_is_not_clamped_at_ceiling() {
        let mut rng = StdRng::seed_from_u64(17);
        let profile = MemoryProfile {
            initial_base: 85.0,
            ..MemoryProfile::default()
        };
        let mut memory = MemoryGenerator::new(profile);

        let above = (0..2_000)
            .map(|_| memory.advance(0.99, &mut rng))
            .filter(|usage| *usage > 85.0)
            .count();
        assert!(above > 0, "Jitter should push some readings above the walk ceiling");
    }
}
