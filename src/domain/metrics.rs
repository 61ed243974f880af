use serde::Serialize;
use std::fmt;

pub const CPU_USAGE_PERCENT: &str = "cpu_usage_percent";
pub const MEMORY_USAGE_PERCENT: &str = "memory_usage_percent";
pub const REQUEST_COUNT_TOTAL: &str = "request_count_total";
pub const ERROR_COUNT_TOTAL: &str = "error_count_total";

/// A single numeric reading as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Gauge(f64),
    Counter(u64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Gauge(v) => write!(f, "{}", v),
            MetricValue::Counter(v) => write!(f, "{}", v),
        }
    }
}

/// The four readings produced by one tick.
///
/// Snapshots are plain values: once built they are never mutated, and the
/// simulator keeps no reference to them after handing them out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSnapshot {
    pub cpu_usage_percent: f64,
    pub memory_usage_percent: f64,
    pub request_count_total: u64,
    pub error_count_total: u64,
}

impl MetricSnapshot {
    /// Named samples in their stable publication order.
    pub fn samples(&self) -> [(&'static str, MetricValue); 4] {
        [
            (CPU_USAGE_PERCENT, MetricValue::Gauge(self.cpu_usage_percent)),
            (
                MEMORY_USAGE_PERCENT,
                MetricValue::Gauge(self.memory_usage_percent),
            ),
            (
                REQUEST_COUNT_TOTAL,
                MetricValue::Counter(self.request_count_total),
            ),
            (ERROR_COUNT_TOTAL, MetricValue::Counter(self.error_count_total)),
        ]
    }
}
