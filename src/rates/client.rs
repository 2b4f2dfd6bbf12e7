//! HTTP client for the exchange-rate service.

use super::models::{RateResponse, RateTable};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

/// Trait for fetching the full rate table - enables mocking for tests.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the complete rate table for the fixed base currency.
    async fn fetch_rates(&self) -> Result<RateTable>;
}

/// Exchange-rate HTTP client. Performs a single request per run.
pub struct RateClient {
    client: Client,
    endpoint: String,
}

impl RateClient {
    /// Creates a new rate client from the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_endpoint(config.rates_url.clone(), config.timeout_secs)
    }

    /// Creates a rate client against an explicit endpoint.
    pub fn with_endpoint(endpoint: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl RateSource for RateClient {
    async fn fetch_rates(&self) -> Result<RateTable> {
        debug!("GET {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send rate request")?;

        if !response.status().is_success() {
            anyhow::bail!("Rate service returned status: {}", response.status());
        }

        let body = response.text().await.context("Failed to read rate response body")?;
        let parsed: RateResponse =
            serde_json::from_str(&body).context("Malformed rate response")?;

        info!("Fetched {} rates for base {}", parsed.rates.len(), parsed.base);
        Ok(RateTable::new(parsed.base, parsed.rates))
    }
}
