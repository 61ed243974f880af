use crate::domain::errors::PublishError;
use crate::domain::metrics::MetricSnapshot;
use crate::domain::ports::MetricsSink;
use crate::infrastructure::pushgateway::exposition::encode_snapshot;
use async_trait::async_trait;
use std::io::Write;

/// Dry-run sink: prints the exposition body instead of sending it.
pub struct StdoutSink;

#[async_trait]
impl MetricsSink for StdoutSink {
    async fn publish(&self, snapshot: &MetricSnapshot) -> Result<(), PublishError> {
        let body = encode_snapshot(snapshot);
        let mut out = std::io::stdout().lock();
        out.write_all(body.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| PublishError::Io {
                reason: e.to_string(),
            })
    }

    fn describe(&self) -> String {
        "stdout (dry run)".to_string()
    }
}
