//! Configuration management with TOML, environment variables, and CLI overrides.
//!
//! Every process-wide constant (catalogue URL, rate endpoint, source
//! currency, fallback rate, defaults) lives here; the struct is normalized
//! once at startup and never mutated afterwards.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Item count used when the requested count is zero or negative.
pub const DEFAULT_COUNT: i64 = 10;

/// Target currency used when none is given.
pub const DEFAULT_TARGET_CURRENCY: &str = "KES";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalogue site
    #[serde(default = "default_catalogue_url")]
    pub catalogue_url: String,

    /// Exchange-rate endpoint returning the full GBP rate table
    #[serde(default = "default_rates_url")]
    pub rates_url: String,

    /// Currency the catalogue prices are denominated in
    #[serde(default = "default_source_currency")]
    pub source_currency: String,

    /// Symbol prefixed to every listing price
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Currency to convert prices into
    #[serde(default = "default_target_currency")]
    pub target_currency: String,

    /// Number of items to collect; non-positive values fall back to the default
    #[serde(default = "default_count")]
    pub count: i64,

    /// Conversion factor substituted when the live rate lookup fails
    #[serde(default = "default_fallback_rate")]
    pub fallback_rate: f64,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay between page requests in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to the delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Pause after a failed page fetch before giving up, in milliseconds
    #[serde(default = "default_error_pause_ms")]
    pub error_pause_ms: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format for the console view
    #[serde(default)]
    pub format: OutputFormat,

    /// Path of the CSV file written each run
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Render the comparison chart
    #[serde(default)]
    pub chart: bool,

    /// Path of the chart SVG written when charting is enabled
    #[serde(default = "default_chart_output")]
    pub chart_output: PathBuf,
}

fn default_catalogue_url() -> String {
    "https://books.toscrape.com".to_string()
}

fn default_rates_url() -> String {
    "https://api.exchangerate-api.com/v4/latest/GBP".to_string()
}

fn default_source_currency() -> String {
    "GBP".to_string()
}

fn default_currency_symbol() -> String {
    "£".to_string()
}

fn default_target_currency() -> String {
    DEFAULT_TARGET_CURRENCY.to_string()
}

fn default_count() -> i64 {
    DEFAULT_COUNT
}

fn default_fallback_rate() -> f64 {
    180.0
}

fn default_delay_ms() -> u64 {
    500
}

fn default_delay_jitter_ms() -> u64 {
    250
}

fn default_error_pause_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_output() -> PathBuf {
    PathBuf::from("converted_prices.csv")
}

fn default_chart_output() -> PathBuf {
    PathBuf::from("price_comparison.svg")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogue_url: default_catalogue_url(),
            rates_url: default_rates_url(),
            source_currency: default_source_currency(),
            currency_symbol: default_currency_symbol(),
            target_currency: default_target_currency(),
            count: default_count(),
            fallback_rate: default_fallback_rate(),
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            error_pause_ms: default_error_pause_ms(),
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
            output: default_output(),
            chart: false,
            chart_output: default_chart_output(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("price-lens").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("LENS_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("LENS_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(currency) = std::env::var("LENS_CURRENCY") {
            self.target_currency = currency;
        }

        self
    }

    /// Normalizes the run parameters, substituting documented defaults for
    /// invalid input. Call once after all overrides are applied.
    pub fn normalized(mut self) -> Self {
        if self.count <= 0 {
            warn!("Invalid item count {}, using default {}", self.count, DEFAULT_COUNT);
            self.count = DEFAULT_COUNT;
        }

        let currency = self.target_currency.trim().to_uppercase();
        if currency.is_empty() {
            warn!("Empty target currency, using default {}", DEFAULT_TARGET_CURRENCY);
            self.target_currency = DEFAULT_TARGET_CURRENCY.to_string();
        } else {
            self.target_currency = currency;
        }

        self
    }
}

/// Output format for the console view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
