//! Per-tick reporting for the generator
//!
//! Logs a one-line console summary of every snapshot and, when enabled,
//! prints the snapshot as structured JSON to stdout for log shippers.

use crate::domain::errors::PublishError;
use crate::domain::metrics::MetricSnapshot;
use crate::infrastructure::observability::metrics::Metrics;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Snapshot record for JSON output
#[derive(Serialize)]
pub struct SnapshotRecord<'a> {
    pub timestamp: String,
    pub tick: u64,
    pub hour: u32,
    pub uptime_seconds: u64,
    pub version: &'static str,
    pub metrics: &'a MetricSnapshot,
}

pub struct SnapshotReporter {
    metrics: Metrics,
    start_time: Instant,
    emit_json: bool,
}

impl SnapshotReporter {
    pub fn new(metrics: Metrics, emit_json: bool) -> Self {
        Self {
            metrics,
            start_time: Instant::now(),
            emit_json,
        }
    }

    pub fn record_snapshot(&self, tick: u64, hour: u32, snapshot: &MetricSnapshot) {
        self.metrics.observe_snapshot(snapshot);

        info!(
            "CPU: {:.1}% | Memory: {:.1}% | Requests: {} | Errors: {}",
            snapshot.cpu_usage_percent,
            snapshot.memory_usage_percent,
            snapshot.request_count_total,
            snapshot.error_count_total
        );

        if self.emit_json {
            let record = self.snapshot_record(tick, hour, snapshot);
            match serde_json::to_string(&record) {
                // Use a special prefix so logs can be easily filtered
                Ok(json) => println!("METRICS_JSON:{}", json),
                Err(e) => warn!("Failed to serialize snapshot: {}", e),
            }
        }
    }

    pub fn record_publish_success(&self, elapsed: Duration) {
        self.metrics.observe_publish_success(elapsed);
        info!(
            "Metrics sent successfully at {}",
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    pub fn record_publish_failure(&self, error: &PublishError, elapsed: Duration) {
        self.metrics
            .observe_publish_failure(error.reason_label(), elapsed);
        warn!("Failed to send metrics: {}", error);
    }

    fn snapshot_record<'a>(
        &self,
        tick: u64,
        hour: u32,
        snapshot: &'a MetricSnapshot,
    ) -> SnapshotRecord<'a> {
        SnapshotRecord {
            timestamp: chrono::Utc::now().to_rfc3339(),
            tick,
            hour,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            version: env!("CARGO_PKG_VERSION"),
            metrics: snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MetricSnapshot {
        MetricSnapshot {
            cpu_usage_percent: 37.2,
            memory_usage_percent: 52.9,
            request_count_total: 812,
            error_count_total: 27,
        }
    }

    #[test]
    fn test_record_snapshot_updates_metrics() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        let reporter = SnapshotReporter::new(metrics.clone(), false);

        reporter.record_snapshot(1, 10, &snapshot());

        assert_eq!(metrics.ticks_total.get(), 1);
        assert_eq!(metrics.last_request_count_total.get(), 812);
    }

    #[test]
    fn test_publish_outcomes_are_counted() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        let reporter = SnapshotReporter::new(metrics.clone(), false);

        reporter.record_publish_success(Duration::from_millis(3));
        reporter.record_publish_failure(
            &PublishError::Transport {
                reason: "connection refused".to_string(),
            },
            Duration::from_millis(1),
        );

        assert_eq!(metrics.publish_success_total.get(), 1);
        assert_eq!(metrics.failures("transport"), 1);
    }

    #[test]
    fn test_snapshot_record_serialization() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        let reporter = SnapshotReporter::new(metrics, true);
        let snapshot = snapshot();

        let record = reporter.snapshot_record(4, 14, &snapshot);
        let json = serde_json::to_string(&record).expect("Failed to serialize");

        assert!(json.contains("\"tick\":4"));
        assert!(json.contains("\"hour\":14"));
        assert!(json.contains("\"request_count_total\":812"));
        assert!(json.contains("\"cpu_usage_percent\":37.2"));
    }
}
