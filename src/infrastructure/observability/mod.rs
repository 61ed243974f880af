//! Push-based observability for the generator
//!
//! Nothing here listens for requests. The generator reports on itself by:
//!
//! 1. **Console logs**: one summary line per tick through `tracing`
//! 2. **Structured JSON** (optional): `METRICS_JSON:` lines on stdout
//! 3. **Self-metrics**: a Prometheus registry rendered into the exit summary

pub mod metrics;
pub mod reporter;

pub use metrics::Metrics;
pub use reporter::SnapshotReporter;
