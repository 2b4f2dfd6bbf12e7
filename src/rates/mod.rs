//! Live exchange-rate lookup with a tagged fallback.
//!
//! The resolver performs exactly one request for the full rate table and
//! never fails the pipeline: any error degrades to a fallback rate that is
//! tagged as such, so the output can surface the approximation.

mod client;
mod models;

pub use client::{RateClient, RateSource};
pub use models::{RateTable, ResolvedRate};

use tracing::{debug, warn};

/// Resolves the conversion rate for `currency`, substituting `fallback`
/// (with a reason) on any failure: network error, malformed response, or a
/// currency missing from the table.
pub async fn resolve(source: &impl RateSource, currency: &str, fallback: f64) -> ResolvedRate {
    match source.fetch_rates().await {
        Ok(table) => match table.get(currency) {
            Some(rate) => {
                debug!("Resolved {} -> {} rate: {}", table.base(), currency, rate);
                ResolvedRate::Live(rate)
            }
            None => {
                let reason =
                    format!("currency '{}' not present in the {} rate table", currency, table.base());
                warn!("{}; using fallback rate {}", reason, fallback);
                ResolvedRate::Fallback { rate: fallback, reason }
            }
        },
        Err(e) => {
            let reason = format!("rate lookup failed: {:#}", e);
            warn!("{}; using fallback rate {}", reason, fallback);
            ResolvedRate::Fallback { rate: fallback, reason }
        }
    }
}
