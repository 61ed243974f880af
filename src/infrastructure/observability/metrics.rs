//! Prometheus self-metrics for the generator
//!
//! All metrics use the `metricsim_` prefix. They describe the generator
//! itself (ticks, publish outcomes) and are kept apart from the synthetic
//! readings it publishes.

use crate::domain::metrics::MetricSnapshot;
use prometheus::{
    Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Ticks executed since start
    pub ticks_total: IntCounter,
    /// Snapshots accepted by the sink
    pub publish_success_total: IntCounter,
    /// Publish failures by reason (status, transport, io)
    pub publish_failures_total: IntCounterVec,
    /// Time spent in a single publish call
    pub publish_duration_seconds: Histogram,
    pub last_cpu_usage_percent: Gauge,
    pub last_memory_usage_percent: Gauge,
    pub last_request_count_total: IntGauge,
    pub last_error_count_total: IntGauge,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let ticks_total = IntCounter::with_opts(Opts::new(
            "metricsim_ticks_total",
            "Generator ticks executed",
        ))?;
        registry.register(Box::new(ticks_total.clone()))?;

        let publish_success_total = IntCounter::with_opts(Opts::new(
            "metricsim_publish_success_total",
            "Snapshots accepted by the collector",
        ))?;
        registry.register(Box::new(publish_success_total.clone()))?;

        let publish_failures_total = IntCounterVec::new(
            Opts::new(
                "metricsim_publish_failures_total",
                "Snapshots dropped after a failed publish",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(publish_failures_total.clone()))?;

        let publish_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "metricsim_publish_duration_seconds",
                "Publish call duration in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        )?;
        registry.register(Box::new(publish_duration_seconds.clone()))?;

        let last_cpu_usage_percent = Gauge::with_opts(Opts::new(
            "metricsim_last_cpu_usage_percent",
            "Most recent simulated CPU usage",
        ))?;
        registry.register(Box::new(last_cpu_usage_percent.clone()))?;

        let last_memory_usage_percent = Gauge::with_opts(Opts::new(
            "metricsim_last_memory_usage_percent",
            "Most recent simulated memory usage",
        ))?;
        registry.register(Box::new(last_memory_usage_percent.clone()))?;

        let last_request_count_total = IntGauge::with_opts(Opts::new(
            "metricsim_last_request_count_total",
            "Most recent simulated request total",
        ))?;
        registry.register(Box::new(last_request_count_total.clone()))?;

        let last_error_count_total = IntGauge::with_opts(Opts::new(
            "metricsim_last_error_count_total",
            "Most recent simulated error total",
        ))?;
        registry.register(Box::new(last_error_count_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            ticks_total,
            publish_success_total,
            publish_failures_total,
            publish_duration_seconds,
            last_cpu_usage_percent,
            last_memory_usage_percent,
            last_request_count_total,
            last_error_count_total,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn observe_snapshot(&self, snapshot: &MetricSnapshot) {
        self.ticks_total.inc();
        self.last_cpu_usage_percent.set(snapshot.cpu_usage_percent);
        self.last_memory_usage_percent
            .set(snapshot.memory_usage_percent);
        self.last_request_count_total
            .set(i64::try_from(snapshot.request_count_total).unwrap_or(i64::MAX));
        self.last_error_count_total
            .set(i64::try_from(snapshot.error_count_total).unwrap_or(i64::MAX));
    }

    pub fn observe_publish_success(&self, elapsed: Duration) {
        self.publish_success_total.inc();
        self.publish_duration_seconds.observe(elapsed.as_secs_f64());
    }

    pub fn observe_publish_failure(&self, reason: &str, elapsed: Duration) {
        self.publish_failures_total
            .with_label_values(&[reason])
            .inc();
        self.publish_duration_seconds.observe(elapsed.as_secs_f64());
    }

    pub fn failures(&self, reason: &str) -> u64 {
        self.publish_failures_total
            .with_label_values(&[reason])
            .get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        assert!(metrics.render().contains("metricsim_ticks_total 0"));
    }

    #[test]
    fn test_snapshot_gauges() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.observe_snapshot(&MetricSnapshot {
            cpu_usage_percent: 61.5,
            memory_usage_percent: 44.0,
            request_count_total: 300,
            error_count_total: 9,
        });

        let output = metrics.render();
        assert!(output.contains("metricsim_ticks_total 1"));
        assert!(output.contains("metricsim_last_cpu_usage_percent 61.5"));
        assert!(output.contains("metricsim_last_request_count_total 300"));
        assert!(output.contains("metricsim_last_error_count_total 9"));
    }

    #[test]
    fn test_failure_counter_by_reason() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.observe_publish_failure("status", Duration::from_millis(12));
        metrics.observe_publish_failure("status", Duration::from_millis(8));
        metrics.observe_publish_failure("transport", Duration::from_millis(30));
        metrics.observe_publish_success(Duration::from_millis(5));

        assert_eq!(metrics.failures("status"), 2);
        assert_eq!(metrics.failures("transport"), 1);
        assert_eq!(metrics.publish_success_total.get(), 1);
        assert_eq!(metrics.publish_duration_seconds.get_sample_count(), 4);
    }
}
