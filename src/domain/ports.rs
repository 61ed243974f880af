use crate::domain::errors::PublishError;
use crate::domain::metrics::MetricSnapshot;
use async_trait::async_trait;

// Need async_trait for async functions in trait objects
#[async_trait]
pub trait MetricsSink: Send + Sync {
    /// Deliver one snapshot. Failures are reported, never retried.
    async fn publish(&self, snapshot: &MetricSnapshot) -> Result<(), PublishError>;

    /// Human-readable destination, used in startup logs.
    fn describe(&self) -> String;
}

/// Source of the wall-clock hour used for diurnal traffic shaping.
pub trait Clock: Send + Sync {
    fn current_hour(&self) -> u32;
}
