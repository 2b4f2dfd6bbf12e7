//! Grouped bar chart comparing source and converted prices.

use crate::convert::ConvertedItem;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

const CHART_SIZE: (u32, u32) = (1024, 640);
const LABEL_MAX_CHARS: usize = 24;

/// Renders the batch as an SVG grouped bar chart: one bar pair per item,
/// source currency next to target currency, item names along the x-axis.
pub fn render_chart(
    path: &Path,
    items: &[ConvertedItem],
    source_currency: &str,
    target_currency: &str,
) -> Result<()> {
    if items.is_empty() {
        anyhow::bail!("Nothing to chart: the batch is empty");
    }

    let max_price =
        items.iter().map(|i| i.price_gbp.max(i.price_target)).fold(0.0_f64, f64::max).max(1.0);

    let names: Vec<String> = items.iter().map(|i| truncate_label(&i.name)).collect();

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Product prices in {} vs {}", source_currency, target_currency),
            ("sans-serif", 24),
        )
        .margin(12)
        .x_label_area_size(170)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..items.len() as f64, 0f64..max_price * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(items.len().min(30))
        .x_label_formatter(&|x| {
            let idx = x.floor() as usize;
            names.get(idx).cloned().unwrap_or_default()
        })
        // Rotated so long titles stay readable
        .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
        .y_desc("Price")
        .draw()?;

    chart
        .draw_series(items.iter().enumerate().map(|(i, item)| {
            let x = i as f64;
            Rectangle::new([(x + 0.10, 0.0), (x + 0.45, item.price_gbp)], BLUE.mix(0.6).filled())
        }))?
        .label(source_currency.to_string())
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.mix(0.6).filled()));

    chart
        .draw_series(items.iter().enumerate().map(|(i, item)| {
            let x = i as f64;
            Rectangle::new([(x + 0.55, 0.0), (x + 0.90, item.price_target)], RED.mix(0.6).filled())
        }))?
        .label(target_currency.to_string())
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], RED.mix(0.6).filled()));

    chart.configure_series_labels().background_style(&WHITE.mix(0.8)).border_style(&BLACK).draw()?;

    root.present()?;
    info!("Wrote chart to {}", path.display());
    Ok(())
}

fn truncate_label(name: &str) -> String {
    if name.chars().count() <= LABEL_MAX_CHARS {
        name.to_string()
    } else {
        let prefix: String = name.chars().take(LABEL_MAX_CHARS - 3).collect();
        format!("{}...", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::models::Item;
    use crate::convert::convert;
    use tempfile::tempdir;

    #[test]
    fn test_render_chart_writes_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.svg");

        let batch = convert(
            vec![Item::new("Book A", 10.00), Item::new("Tipping the Velvet", 53.74)],
            150.0,
            "KES",
        );

        render_chart(&path, &batch, "GBP", "KES").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
        assert!(contents.contains("GBP"));
        assert!(contents.contains("KES"));
    }

    #[test]
    fn test_render_chart_empty_batch_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.svg");

        let result = render_chart(&path, &[], "GBP", "KES");
        assert!(result.is_err());
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Short"), "Short");

        let long = "The Improbability of Love: A Very Long Subtitle Indeed";
        let truncated = truncate_label(long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), LABEL_MAX_CHARS);
    }
}
