use crate::domain::errors::PublishError;
use crate::domain::metrics::MetricSnapshot;
use crate::domain::ports::MetricsSink;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Sink that keeps every snapshot it is offered.
///
/// With `rejecting` it still records the snapshot but reports the given
/// HTTP status, which lets tests exercise the failure path without a network.
#[derive(Clone, Default)]
pub struct InMemorySink {
    received: Arc<Mutex<Vec<MetricSnapshot>>>,
    reject_with: Option<u16>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(status: u16) -> Self {
        Self {
            received: Arc::default(),
            reject_with: Some(status),
        }
    }

    pub async fn snapshots(&self) -> Vec<MetricSnapshot> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl MetricsSink for InMemorySink {
    async fn publish(&self, snapshot: &MetricSnapshot) -> Result<(), PublishError> {
        self.received.lock().await.push(*snapshot);
        match self.reject_with {
            Some(status) => Err(PublishError::Rejected { status }),
            None => Ok(()),
        }
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
