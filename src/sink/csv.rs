//! CSV persistence for converted batches.

use crate::convert::ConvertedItem;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Header row naming the persisted record fields.
pub const CSV_HEADER: &str = "name,price_gbp,price_target,currency,captured_at";

/// Serializes a batch as CSV: the header row plus one row per record.
pub fn to_csv(items: &[ConvertedItem]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for item in items {
        lines.push(format!(
            "{},{:.2},{:.2},{},{}",
            csv_escape(&item.name),
            item.price_gbp,
            item.price_target,
            item.currency,
            item.captured_at_display()
        ));
    }

    lines.join("\n")
}

/// Writes the batch to `path`, overwriting any existing file.
pub fn write_csv(path: &Path, items: &[ConvertedItem]) -> Result<()> {
    let mut contents = to_csv(items);
    contents.push('\n');

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    info!("Wrote {} rows to {}", items.len(), path.display());
    Ok(())
}

pub(crate) fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
