//! Command-line argument parsing for meal_weather
//!
//! Defines the CLI structure using clap derive macros.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::app::ProviderKind;
use crate::constants::cli;

/// meal_weather - Weather forecasts for meal dates
#[derive(Parser, Debug)]
#[command(
    name = "meal_weather",
    version,
    about = "Cached weather forecasts for meal dates",
    long_about = "Looks up daily weather forecasts for meal dates through a TTL cache.
Forecasts come from the IPMA open-data API or a deterministic mock generator."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - only errors are logged
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Forecast provider (overrides configuration): mock or ipma
    #[arg(long, global = true, value_name = "PROVIDER")]
    pub provider: Option<ProviderKind>,

    /// Cache TTL in milliseconds (overrides configuration)
    #[arg(long, global = true, value_name = "MS")]
    pub ttl_ms: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show forecasts for dates or for the next few days
    Forecast(ForecastArgs),

    /// Demonstrate cache hits and TTL expiry for today's forecast
    CacheCheck(CacheCheckArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the forecast command
#[derive(Args, Debug, Clone)]
pub struct ForecastArgs {
    /// Dates to look up (YYYY-MM-DD)
    #[arg(value_name = "DATE", value_parser = parse_date)]
    pub dates: Vec<NaiveDate>,

    /// Look up this many days starting today (1-10)
    #[arg(
        short,
        long,
        conflicts_with = "dates",
        value_parser = clap::value_parser!(u32).range(1..=cli::MAX_FORECAST_DAYS as i64)
    )]
    pub days: Option<u32>,

    /// Print cache statistics after the forecasts
    #[arg(long)]
    pub stats: bool,
}

impl ForecastArgs {
    /// Validate that something was requested
    pub fn validate(&self) -> Result<(), String> {
        if self.dates.is_empty() && self.days.is_none() {
            return Err("Provide at least one DATE or --days N".to_string());
        }
        Ok(())
    }
}

/// Arguments for the cache-check command
#[derive(Args, Debug, Clone)]
pub struct CacheCheckArgs {
    /// Wait before the second lookup, in milliseconds (should be under the TTL)
    #[arg(long, default_value_t = cli::CACHE_CHECK_FIRST_WAIT_MS)]
    pub first_wait_ms: u64,

    /// Additional wait before the third lookup, in milliseconds
    #[arg(long, default_value_t = cli::CACHE_CHECK_SECOND_WAIT_MS)]
    pub second_wait_ms: u64,
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default configuration file if none exists
    Init {
        /// Where to write the file (defaults to the user config directory)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}' (expected YYYY-MM-DD): {}", raw, e))
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log directive derived from the verbosity flags, if any was given
    pub fn log_level(&self) -> Option<&'static str> {
        if self.global.quiet {
            Some("error")
        } else if self.global.very_verbose {
            Some("debug")
        } else if self.global.verbose {
            Some("info")
        } else {
            None
        }
    }
}
