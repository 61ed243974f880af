use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the HTTP client used to push metrics.
    ///
    /// No retry middleware: a snapshot that fails to publish is dropped and
    /// the next tick carries fresher values anyway.
    pub fn create_client(request_timeout: Duration) -> Result<Client> {
        Client::builder()
            .pool_max_idle_per_host(1)
            .timeout(request_timeout)
            .connect_timeout(request_timeout.min(Duration::from_secs(10)))
            .user_agent(concat!("metricsim/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")
    }
}
