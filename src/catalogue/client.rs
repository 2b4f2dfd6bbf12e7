//! HTTP client for catalogue requests using wreq with browser emulation.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for fetching catalogue listing pages - enables mocking for tests.
#[async_trait]
pub trait PageFetch: Send + Sync {
    /// Fetches one listing page's HTML. Pages are numbered from 1.
    async fn listing_page(&self, page: u32) -> Result<String>;
}

/// Catalogue HTTP client with a polite inter-request delay.
pub struct CatalogueClient {
    client: Client,
    base_url: String,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl CatalogueClient {
    /// Creates a new catalogue client from the configuration. The base URL
    /// comes from the config, so tests can point it at a local server.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.catalogue_url.trim_end_matches('/').to_string(),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// Performs a GET request with the polite delay applied first.
    async fn get(&self, url: &str) -> Result<String> {
        self.delay().await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-GB,en;q=0.9")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Rate limited (503). Consider increasing --delay.");
            anyhow::bail!("Rate limited by the catalogue. Try increasing --delay.");
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }

    /// Adds a small randomized delay between page requests.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl PageFetch for CatalogueClient {
    async fn listing_page(&self, page: u32) -> Result<String> {
        let url = format!("{}/catalogue/page-{}.html", self.base_url, page);

        info!("Fetching listing page {}", page);
        self.get(&url).await
    }
}
