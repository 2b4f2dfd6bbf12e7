//! Batch currency conversion.

use crate::catalogue::models::Item;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An item that has passed through conversion. Carries the GBP price it was
/// derived from, the converted amount, and the batch capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedItem {
    /// Product title
    pub name: String,
    /// Listing price in GBP
    pub price_gbp: f64,
    /// Converted price, rounded to 2 decimal places
    pub price_target: f64,
    /// Target currency code
    pub currency: String,
    /// Capture time, shared by every record in the batch
    pub captured_at: DateTime<Utc>,
}

impl ConvertedItem {
    /// Formats the capture time for display and persistence.
    pub fn captured_at_display(&self) -> String {
        self.captured_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Converts a batch of items at the given rate.
///
/// Pure over the batch: each converted price is `price_gbp * rate` rounded
/// to 2 decimal places (half away from zero), and every record receives the
/// same capture timestamp, computed once. An empty batch is a no-op.
pub fn convert(items: Vec<Item>, rate: f64, currency: &str) -> Vec<ConvertedItem> {
    let captured_at = Utc::now();

    let batch: Vec<ConvertedItem> = items
        .into_iter()
        .map(|item| ConvertedItem {
            price_target: round_to_cents(item.price_gbp * rate),
            name: item.name,
            price_gbp: item.price_gbp,
            currency: currency.to_string(),
            captured_at,
        })
        .collect();

    debug!("Converted {} items to {} at rate {}", batch.len(), currency, rate);
    batch
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
