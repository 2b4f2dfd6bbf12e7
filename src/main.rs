//! price-lens - Catalogue price scraper with live currency conversion

use anyhow::Result;
use clap::{Parser, Subcommand};
use price_lens::commands::{RatesCommand, ScrapeCommand};
use price_lens::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "price-lens",
    version,
    about = "Catalogue price scraper with live currency conversion",
    long_about = "Scrapes a paginated book catalogue, converts the GBP listing prices to a \
                  target currency with a live exchange-rate lookup, and writes the batch to CSV."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Delay between page requests in milliseconds
    #[arg(long, global = true, env = "LENS_DELAY")]
    delay: Option<u64>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "LENS_PROXY")]
    proxy: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the catalogue and convert prices
    #[command(alias = "s")]
    Scrape {
        /// Number of items to collect (non-positive values fall back to 10)
        #[arg(short = 'n', long, default_value = "10")]
        count: i64,

        /// Target currency code (empty falls back to KES)
        #[arg(long, default_value = "KES", env = "LENS_CURRENCY")]
        currency: String,

        /// Path of the CSV file to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render a comparison chart
        #[arg(long)]
        chart: bool,

        /// Path of the chart SVG
        #[arg(long)]
        chart_output: Option<PathBuf>,
    },

    /// Show live exchange rates for the catalogue currency
    Rates {
        /// Resolve a single currency code instead of listing the table
        code: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Scrape { count, currency, output, chart, chart_output } => {
            config.count = count;
            config.target_currency = currency;
            config.chart = chart;

            if let Some(output) = output {
                config.output = output;
            }
            if let Some(chart_output) = chart_output {
                config.chart_output = chart_output;
            }

            let cmd = ScrapeCommand::new(config.normalized());
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Rates { code } => {
            let cmd = RatesCommand::new(config.normalized());
            let output = cmd.execute(code.as_deref()).await?;
            println!("{}", output);
        }
    }

    Ok(())
}
