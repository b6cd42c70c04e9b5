//! meal_weather CLI application
//!
//! Command-line interface for cached weather forecasts of meal dates.

use std::process;

use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use meal_weather::cli::{
    apply_overrides, handle_cache_check, handle_config, handle_forecast, Cli, Commands,
};
use meal_weather::config::AppConfig;
use meal_weather::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    // Config commands must work even when the current config is broken
    let (mut config, problems) = match cli.command {
        Commands::Config(_) => AppConfig::load_lenient(cli.global.config.clone()).await,
        _ => (AppConfig::load(cli.global.config.clone()).await?, Vec::new()),
    };
    apply_overrides(&mut config, &cli.global);

    init_logging(&cli, &config);
    for problem in &problems {
        warn!("Configuration problem: {}", problem);
    }

    info!("meal_weather v{} starting", env!("CARGO_PKG_VERSION"));

    let json = cli.global.json;
    match cli.command {
        Commands::Forecast(args) => {
            info!("Executing forecast command");
            handle_forecast(args, &config, json).await
        }
        Commands::CacheCheck(args) => {
            info!("Executing cache-check command");
            handle_cache_check(args, &config, cli.global.ttl_ms.is_some(), json).await
        }
        Commands::Config(args) => handle_config(args, &config).await,
    }
}

/// Initialize logging from CLI verbosity, falling back to the configured level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let level = cli.log_level().unwrap_or(config.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("meal_weather={}", level)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .with_writer(std::io::stderr)
        .init();
}
