//! Prometheus Pushgateway sink.
//!
//! Each snapshot is POSTed as exposition text to
//! `<base>/metrics/job/<job>/instance/<instance>`. Only HTTP 200 counts as
//! delivered; nothing is retried.

pub mod exposition;

use crate::config::PushgatewayEnvConfig;
use crate::domain::errors::PublishError;
use crate::domain::metrics::MetricSnapshot;
use crate::domain::ports::MetricsSink;
use crate::infrastructure::core::HttpClientFactory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct PushgatewaySink {
    client: Client,
    endpoint: Url,
}

impl PushgatewaySink {
    pub fn new(config: &PushgatewayEnvConfig) -> Result<Self> {
        let endpoint = push_endpoint(&config.url, &config.job, &config.instance)?;
        let client = HttpClientFactory::create_client(Duration::from_millis(config.timeout_ms))?;
        Ok(Self { client, endpoint })
    }
}

/// Build the grouping-key URL for a job/instance pair.
pub fn push_endpoint(base_url: &str, job: &str, instance: &str) -> Result<Url> {
    let mut url =
        Url::parse(base_url).with_context(|| format!("Invalid Pushgateway URL: {}", base_url))?;

    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Pushgateway URL cannot be a base: {}", base_url))?
        .pop_if_empty()
        .extend(["metrics", "job", job, "instance", instance]);

    Ok(url)
}

#[async_trait]
impl MetricsSink for PushgatewaySink {
    async fn publish(&self, snapshot: &MetricSnapshot) -> Result<(), PublishError> {
        let body = exposition::encode_snapshot(snapshot);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, exposition::CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| PublishError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PublishError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!("PushgatewaySink: {} accepted snapshot", self.endpoint);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("Pushgateway {}", self.endpoint)
    }
}
