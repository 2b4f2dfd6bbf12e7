//! HTML parser for catalogue listing pages.

use crate::catalogue::models::Item;
use crate::catalogue::selectors::listing;
use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::{debug, trace};

/// Extraction failures. Any of these aborts the run; a listing entry is
/// never silently skipped.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("listing entry {index} has no title")]
    MissingTitle { index: usize },

    #[error("listing entry '{name}' has no price element")]
    MissingPrice { name: String },

    #[error("price text '{text}' does not start with the expected symbol '{symbol}'")]
    MissingSymbol { text: String, symbol: String },

    #[error("could not parse price amount '{text}'")]
    BadAmount {
        text: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

/// Parser for catalogue listing pages.
pub struct Parser {
    symbol: String,
}

impl Parser {
    /// Creates a new parser expecting prices prefixed with `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into() }
    }

    /// Parses a listing page into items in document order.
    ///
    /// A page with no product cards yields an empty vector; a card with a
    /// missing title or malformed price is an error.
    pub fn parse_listing(&self, html: &str) -> Result<Vec<Item>, ExtractError> {
        let document = Html::parse_document(html);

        let mut items = Vec::new();
        for (index, element) in document.select(&listing::POD).enumerate() {
            let item = self.parse_pod(element, index)?;
            trace!("Parsed listing: {} - {}{}", item.name, self.symbol, item.price_gbp);
            items.push(item);
        }

        debug!("Parsed {} listings", items.len());
        Ok(items)
    }

    /// Parses a single product card.
    fn parse_pod(&self, element: ElementRef, index: usize) -> Result<Item, ExtractError> {
        // The anchor text is ellipsized; the title attribute carries the
        // full name
        let name = element
            .select(&listing::TITLE_LINK)
            .next()
            .and_then(|a| {
                a.value()
                    .attr("title")
                    .map(str::to_string)
                    .or_else(|| Some(a.text().collect::<String>()))
            })
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ExtractError::MissingTitle { index })?;

        let price_text = element
            .select(&listing::PRICE)
            .next()
            .map(|e| e.text().collect::<String>())
            .ok_or_else(|| ExtractError::MissingPrice { name: name.clone() })?;

        let price_gbp = self.parse_price(&price_text)?;

        Ok(Item { name, price_gbp })
    }

    /// Strips the currency symbol prefix and parses the remainder as a
    /// decimal amount.
    fn parse_price(&self, text: &str) -> Result<f64, ExtractError> {
        let trimmed = text.trim();

        let amount = trimmed.strip_prefix(&self.symbol).ok_or_else(|| {
            ExtractError::MissingSymbol { text: trimmed.to_string(), symbol: self.symbol.clone() }
        })?;

        amount
            .trim()
            .parse()
            .map_err(|source| ExtractError::BadAmount { text: amount.trim().to_string(), source })
    }
}
