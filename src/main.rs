//! metricsim - synthetic telemetry generator
//!
//! Fabricates CPU, memory and request/error metrics and pushes them to a
//! Prometheus Pushgateway on a fixed cadence, for populating demo dashboards.
//!
//! # Usage
//! ```sh
//! PUSHGATEWAY_URL=http://localhost:9091 cargo run -- --interval 5
//! cargo run -- --dry-run --startup-delay 0 --ticks 3 --seed 7
//! ```
//!
//! Environment variables are documented in `config`; flags override them.

use anyhow::{Context, Result};
use clap::Parser;
use metricsim::application::simulator::MetricSimulator;
use metricsim::application::system::{GeneratorLoop, shutdown_channel};
use metricsim::config::{Config, LogFormat};
use metricsim::domain::ports::{Clock, MetricsSink};
use metricsim::infrastructure::observability::{Metrics, SnapshotReporter};
use metricsim::infrastructure::{FixedClock, PushgatewaySink, StdoutSink, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, debug, error, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Synthetic telemetry generator for Prometheus Pushgateway", long_about = None)]
struct Cli {
    /// Pushgateway base URL
    #[arg(long)]
    pushgateway_url: Option<String>,

    /// Seconds between ticks
    #[arg(short, long)]
    interval: Option<u64>,

    /// Seconds to wait before the first tick
    #[arg(long)]
    startup_delay: Option<u64>,

    /// RNG seed for a reproducible series
    #[arg(long)]
    seed: Option<u64>,

    /// Pin the traffic model to this hour of day (0-23)
    #[arg(long)]
    hour: Option<u32>,

    /// Exit after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// TOML file overriding the simulation profile
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Print payloads to stdout instead of pushing them
    #[arg(long)]
    dry_run: bool,

    /// Also print each snapshot as a METRICS_JSON line
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(url) = self.pushgateway_url {
            config.pushgateway.url = url;
        }
        if let Some(interval) = self.interval {
            config.simulation.interval_secs = interval;
        }
        if let Some(delay) = self.startup_delay {
            config.simulation.startup_delay_secs = delay;
        }
        if self.seed.is_some() {
            config.simulation.seed = self.seed;
        }
        if self.hour.is_some() {
            config.simulation.fixed_hour = self.hour;
        }
        if self.ticks.is_some() {
            config.simulation.max_ticks = self.ticks;
        }
        if self.profile.is_some() {
            config.simulation.profile_path = self.profile;
        }
        config.observability.dry_run |= self.dry_run;
        config.observability.snapshot_json |= self.json;
    }
}

fn init_tracing(format: LogFormat) {
    let filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into());

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).pretty())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    cli.apply(&mut config);
    config.validate()?;

    init_tracing(config.observability.log_format);

    info!("metricsim {} starting...", env!("CARGO_PKG_VERSION"));

    let profile = config.simulation.load_profile()?;
    let simulator = match config.simulation.seed {
        Some(seed) => {
            info!("Seeded run (seed={})", seed);
            MetricSimulator::seeded(profile, seed)
        }
        None => MetricSimulator::from_entropy(profile),
    }
    .context("Failed to build metric simulator")?;

    let sink: Arc<dyn MetricsSink> = if config.observability.dry_run {
        Arc::new(StdoutSink)
    } else {
        Arc::new(PushgatewaySink::new(&config.pushgateway)?)
    };

    let clock: Arc<dyn Clock> = match config.simulation.fixed_hour {
        Some(hour) => {
            info!("Traffic model pinned to hour {}", hour);
            Arc::new(FixedClock(hour))
        }
        None => Arc::new(SystemClock),
    };

    let metrics = Metrics::new()?;
    let reporter = SnapshotReporter::new(metrics.clone(), config.observability.snapshot_json);

    let (trigger, shutdown) = shutdown_channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C signal.");
                trigger.trigger();
            }
            Err(err) => {
                error!("Unable to listen for shutdown signal: {}", err);
            }
        }
    });

    info!("Press Ctrl+C to stop");
    let generator = GeneratorLoop::new(simulator, sink, clock, reporter, config.loop_settings());
    let summary = generator.run(shutdown).await;

    info!(
        "Generator stopped after {} ticks ({} published, {} failed)",
        summary.ticks, summary.published, summary.failed
    );
    debug!("Self-metrics:\n{}", metrics.render());

    Ok(())
}
