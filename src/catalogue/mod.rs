//! Catalogue-specific modules for HTTP client, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{CatalogueClient, PageFetch};
pub use models::Item;
pub use parser::{ExtractError, Parser};
