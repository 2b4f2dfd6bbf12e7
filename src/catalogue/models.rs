//! Data models for catalogue listings.

use serde::{Deserialize, Serialize};

/// A single listing extracted from a catalogue page, priced in the site's
/// native currency. Conversion produces a separate type, so an `Item` can
/// never carry a half-populated converted price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Product title as shown on the listing page
    pub name: String,
    /// Listing price in GBP
    pub price_gbp: f64,
}

impl Item {
    /// Creates a new item.
    pub fn new(name: impl Into<String>, price_gbp: f64) -> Self {
        Self { name: name.into(), price_gbp }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_new() {
        let item = Item::new("A Light in the Attic", 51.77);
        assert_eq!(item.name, "A Light in the Attic");
        assert_eq!(item.price_gbp, 51.77);
    }

    #[test]
    fn test_item_serde() {
        let item = Item::new("Tipping the Velvet", 53.74);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("Tipping the Velvet"));

        let parsed: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }
}
