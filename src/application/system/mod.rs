//! Generator loop: drives the simulator on a fixed cadence and hands each
//! snapshot to a sink.

pub mod shutdown;

pub use shutdown::{ShutdownSignal, ShutdownTrigger, shutdown_channel};

use crate::application::simulator::MetricSimulator;
use crate::domain::metrics::MetricSnapshot;
use crate::domain::ports::{Clock, MetricsSink};
use crate::infrastructure::observability::SnapshotReporter;
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    pub interval: Duration,
    pub startup_delay: Duration,
    /// Stop after this many ticks; run until shutdown when `None`.
    pub max_ticks: Option<u64>,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            startup_delay: Duration::from_secs(30),
            max_ticks: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub published: u64,
    pub failed: u64,
    pub last_snapshot: Option<MetricSnapshot>,
}

pub struct GeneratorLoop<R: Rng = StdRng> {
    simulator: MetricSimulator<R>,
    sink: Arc<dyn MetricsSink>,
    clock: Arc<dyn Clock>,
    reporter: SnapshotReporter,
    settings: LoopSettings,
}

impl<R: Rng> GeneratorLoop<R> {
    pub fn new(
        simulator: MetricSimulator<R>,
        sink: Arc<dyn MetricsSink>,
        clock: Arc<dyn Clock>,
        reporter: SnapshotReporter,
        settings: LoopSettings,
    ) -> Self {
        Self {
            simulator,
            sink,
            clock,
            reporter,
            settings,
        }
    }

    /// Run until shutdown is requested or the tick limit is reached.
    ///
    /// The signal is only consulted between ticks: a tick that has started
    /// always finishes its publish attempt before the loop exits.
    pub async fn run(mut self, mut shutdown: ShutdownSignal) -> RunSummary {
        let mut summary = RunSummary::default();

        info!(
            "GeneratorLoop: publishing to {} every {:?}",
            self.sink.describe(),
            self.settings.interval
        );

        if !self.settings.startup_delay.is_zero() {
            info!(
                "GeneratorLoop: waiting {:?} for collector services to start...",
                self.settings.startup_delay
            );
            tokio::select! {
                _ = tokio::time::sleep(self.settings.startup_delay) => {}
                _ = shutdown.triggered() => {
                    info!("GeneratorLoop: shutdown requested during startup delay");
                    return summary;
                }
            }
        }

        let mut ticker = tokio::time::interval(self.settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if self.limit_reached(summary.ticks) {
                info!("GeneratorLoop: tick limit of {} reached", summary.ticks);
                break;
            }

            tokio::select! {
                biased;
                _ = shutdown.triggered() => {
                    info!("GeneratorLoop: stopping metric generator...");
                    break;
                }
                _ = ticker.tick() => {}
            }

            self.run_tick(&mut summary).await;
        }

        summary
    }

    async fn run_tick(&mut self, summary: &mut RunSummary) {
        let hour = self.clock.current_hour();
        let snapshot = self.simulator.tick(hour);
        summary.ticks += 1;

        self.reporter.record_snapshot(summary.ticks, hour, &snapshot);

        let started = Instant::now();
        match self.sink.publish(&snapshot).await {
            Ok(()) => {
                summary.published += 1;
                self.reporter.record_publish_success(started.elapsed());
            }
            Err(e) => {
                summary.failed += 1;
                self.reporter.record_publish_failure(&e, started.elapsed());
            }
        }

        summary.last_snapshot = Some(snapshot);
    }

    fn limit_reached(&self, ticks: u64) -> bool {
        self.settings.max_ticks.is_some_and(|max| ticks >= max)
    }
}
