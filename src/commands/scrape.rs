//! Scrape command: the collect -> resolve -> convert -> persist pipeline.

use crate::catalogue::{CatalogueClient, Item, PageFetch, Parser};
use crate::config::Config;
use crate::convert::convert;
use crate::format::Formatter;
use crate::rates::{self, RateClient, RateSource};
use crate::sink;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Executes the full scrape-and-convert pipeline.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the pipeline and returns the formatted console output.
    pub async fn execute(&self) -> Result<String> {
        let pages = CatalogueClient::new(&self.config).context("Failed to create HTTP client")?;
        let rates = RateClient::new(&self.config).context("Failed to create rate client")?;

        self.execute_with(&pages, &rates).await
    }

    /// Runs the pipeline with provided clients (for testing).
    pub async fn execute_with(
        &self,
        pages: &impl PageFetch,
        rate_source: &impl RateSource,
    ) -> Result<String> {
        let items = self.collect(pages).await?;

        if items.is_empty() {
            info!("Nothing collected, ending run");
            return Ok("No items collected.".to_string());
        }

        let resolved =
            rates::resolve(rate_source, &self.config.target_currency, self.config.fallback_rate)
                .await;

        info!(
            "Exchange rate {} to {}: {}",
            self.config.source_currency,
            self.config.target_currency,
            resolved.value()
        );

        let batch = convert(items, resolved.value(), &self.config.target_currency);

        sink::write_csv(&self.config.output, &batch)?;

        if self.config.chart {
            sink::render_chart(
                &self.config.chart_output,
                &batch,
                &self.config.source_currency,
                &self.config.target_currency,
            )?;
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_batch(&batch, &resolved))
    }

    /// Collects up to the configured number of items, walking listing pages
    /// from page 1.
    ///
    /// A failed fetch ends collection after a short pause and yields
    /// whatever was accumulated so far; a page with no entries ends
    /// collection (the catalogue is exhausted); a malformed listing entry
    /// fails the whole run.
    pub async fn collect(&self, pages: &impl PageFetch) -> Result<Vec<Item>> {
        let target = self.config.count as usize;
        let parser = Parser::new(self.config.currency_symbol.as_str());

        let mut items: Vec<Item> = Vec::with_capacity(target);
        let mut page: u32 = 1;

        while items.len() < target {
            let html = match pages.listing_page(page).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Failed to fetch page {}: {:#}", page, e);
                    tokio::time::sleep(Duration::from_millis(self.config.error_pause_ms)).await;
                    break;
                }
            };

            let entries = parser.parse_listing(&html)?;
            if entries.is_empty() {
                debug!("Page {} yielded no entries, stopping", page);
                break;
            }

            let remaining = target - items.len();
            items.extend(entries.into_iter().take(remaining));

            page += 1;
        }

        info!("Collected {} items", items.len());
        Ok(items)
    }
}
