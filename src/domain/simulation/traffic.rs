use crate::domain::errors::ProfileError;
use crate::domain::simulation::profile::{DiurnalBand, TrafficProfile};
use rand::Rng;
use rand_distr::{Binomial, Distribution, Poisson};

/// Cumulative request and error totals after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestTotals {
    pub requests: u64,
    pub errors: u64,
}

/// Diurnal Poisson arrivals with a per-tick binomial error draw.
///
/// Both counters only ever grow, and errors are drawn from the newly arrived
/// requests of the same tick, so `errors <= requests` holds at all times.
#[derive(Debug, Clone)]
pub struct TrafficGenerator {
    totals: RequestTotals,
    profile: TrafficProfile,
    business: Poisson<f64>,
    evening: Poisson<f64>,
    off_hours: Poisson<f64>,
}

impl TrafficGenerator {
    pub fn new(profile: TrafficProfile) -> Result<Self, ProfileError> {
        Ok(Self {
            totals: RequestTotals::default(),
            business: arrivals(DiurnalBand::Business, &profile)?,
            evening: arrivals(DiurnalBand::Evening, &profile)?,
            off_hours: arrivals(DiurnalBand::OffHours, &profile)?,
            profile,
        })
    }

    pub fn totals(&self) -> RequestTotals {
        self.totals
    }

    /// Draw the number of requests arriving during one tick at `hour`.
    pub fn sample_arrivals<R: Rng + ?Sized>(&self, hour: u32, rng: &mut R) -> u64 {
        let distribution = match self.profile.band_for_hour(hour) {
            DiurnalBand::Business => &self.business,
            DiurnalBand::Evening => &self.evening,
            DiurnalBand::OffHours => &self.off_hours,
        };
        distribution.sample(rng) as u64
    }

    pub fn next_totals<R: Rng + ?Sized>(&mut self, hour: u32, rng: &mut R) -> RequestTotals {
        let new_requests = self.sample_arrivals(hour, rng);
        self.record_arrivals(new_requests, rng)
    }

    /// Fold `new_requests` into the totals and draw their errors.
    pub fn record_arrivals<R: Rng + ?Sized>(
        &mut self,
        new_requests: u64,
        rng: &mut R,
    ) -> RequestTotals {
        self.totals.requests = self.totals.requests.saturating_add(new_requests);

        if new_requests > 0 {
            let error_rate = self.profile.error_rate.sample(rng);
            // Rates are validated into [0, 1] with the profile, so construction cannot fail.
            let new_errors = Binomial::new(new_requests, error_rate)
                .map_or(0, |distribution| distribution.sample(rng));
            self.totals.errors = self
                .totals
                .errors
                .saturating_add(new_errors)
                .min(self.totals.requests);
        }

        self.totals
    }
}

fn arrivals(band: DiurnalBand, profile: &TrafficProfile) -> Result<Poisson<f64>, ProfileError> {
    let lambda = profile.rate_for(band);
    Poisson::new(lambda).map_err(|_| ProfileError::InvalidRequestRate {
        band: band.as_str(),
        lambda,
    })
}
