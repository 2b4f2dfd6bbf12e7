//! Output formatting for converted batches (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::convert::ConvertedItem;
use crate::rates::ResolvedRate;
use crate::sink;

/// Formats converted batches for the console.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the batch, surfacing a degraded-rate warning where the
    /// format allows it.
    pub fn format_batch(&self, items: &[ConvertedItem], rate: &ResolvedRate) -> String {
        if items.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => sink::csv::CSV_HEADER.to_string(),
                _ => "No items collected.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_batch(items),
            OutputFormat::Table => self.table_batch(items, rate),
            OutputFormat::Markdown => self.markdown_batch(items),
            OutputFormat::Csv => sink::csv::to_csv(items),
        }
    }

    fn json_batch(&self, items: &[ConvertedItem]) -> String {
        serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
    }

    fn table_batch(&self, items: &[ConvertedItem], rate: &ResolvedRate) -> String {
        let name_width = 44;
        let price_width = 12;
        let time_width = 19;

        let currency = items.first().map(|i| i.currency.as_str()).unwrap_or("Target");

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<name_width$}  {:>price_width$}  {:>price_width$}  {:<time_width$}",
            "Name", "GBP", currency, "Captured"
        ));
        lines.push(format!(
            "{:-<name_width$}  {:-<price_width$}  {:-<price_width$}  {:-<time_width$}",
            "", "", "", ""
        ));

        // Rows
        for item in items {
            lines.push(format!(
                "{:<name_width$}  {:>price_width$.2}  {:>price_width$.2}  {:<time_width$}",
                truncate(&item.name, name_width),
                item.price_gbp,
                item.price_target,
                item.captured_at_display()
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} items", items.len()));

        if let Some(reason) = rate.fallback_reason() {
            lines.push(format!(
                "Warning: approximate conversion using fallback rate {} ({})",
                rate.value(),
                reason
            ));
        }

        lines.join("\n")
    }

    fn markdown_batch(&self, items: &[ConvertedItem]) -> String {
        let currency = items.first().map(|i| i.currency.as_str()).unwrap_or("Target");

        let mut lines = Vec::new();

        lines.push(format!("| Name | GBP | {} | Captured |", currency));
        lines.push("|------|-----|-----|----------|".to_string());

        for item in items {
            lines.push(format!(
                "| {} | {:.2} | {:.2} | {} |",
                truncate(&item.name, 40),
                item.price_gbp,
                item.price_target,
                item.captured_at_display()
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} items*", items.len()));

        lines.join("\n")
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", prefix)
    }
}
