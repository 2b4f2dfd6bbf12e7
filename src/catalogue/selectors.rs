//! CSS selectors for catalogue HTML parsing.
//!
//! This file contains all CSS selectors used for parsing listing pages.
//! Update this file when the site changes its HTML structure.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update selectors, and add test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for listing pages.
pub mod listing {
    use super::*;

    /// Product card container - one per listed item.
    pub static POD: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("article.product_pod, .product_pod").unwrap());

    /// Title anchor; the full title lives in its `title` attribute, the
    /// anchor text is an ellipsized version.
    pub static TITLE_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("h3 a").unwrap());

    /// Listing price text (symbol-prefixed).
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".product_price .price_color, \
             .price_color",
        )
        .unwrap()
    });
}
