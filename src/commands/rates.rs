//! Rates command: inspect the live exchange-rate table.

use crate::config::Config;
use crate::rates::{self, RateClient, RateSource, ResolvedRate};
use anyhow::Result;

/// Prints the live rate table, or resolves a single currency code.
pub struct RatesCommand {
    config: Config,
}

impl RatesCommand {
    /// Creates a new rates command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the command and returns formatted output.
    pub async fn execute(&self, code: Option<&str>) -> Result<String> {
        let client = RateClient::new(&self.config)?;
        self.execute_with(&client, code).await
    }

    /// Executes with a provided rate source (for testing).
    pub async fn execute_with(
        &self,
        source: &impl RateSource,
        code: Option<&str>,
    ) -> Result<String> {
        match code {
            Some(code) => {
                let resolved =
                    rates::resolve(source, code, self.config.fallback_rate).await;
                let code = code.trim().to_uppercase();

                Ok(match resolved {
                    ResolvedRate::Live(rate) => {
                        format!("{} -> {}: {}", self.config.source_currency, code, rate)
                    }
                    ResolvedRate::Fallback { rate, reason } => format!(
                        "{} -> {}: {} (fallback; {})",
                        self.config.source_currency, code, rate, reason
                    ),
                })
            }
            None => {
                let table = source.fetch_rates().await?;

                let mut lines = Vec::new();
                lines.push(format!("Live {} exchange rates:", table.base()));
                lines.push(String::new());
                lines.push(format!("{:<8} {:>14}", "Code", "Rate"));
                lines.push(format!("{:-<8} {:-<14}", "", ""));

                for (code, rate) in table.sorted() {
                    lines.push(format!("{:<8} {:>14.4}", code, rate));
                }

                lines.push(String::new());
                lines.push(format!("Total: {} currencies", table.len()));

                Ok(lines.join("\n"))
            }
        }
    }
}
