//! Command handlers for the meal_weather CLI
//!
//! Each handler builds a service from the effective configuration, runs its
//! lookups, and prints the results. The cache lives only for the duration of
//! one invocation.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::app::{CacheStatistics, Forecast, WeatherCacheService};
use crate::cli::{CacheCheckArgs, ConfigAction, ConfigArgs, ForecastArgs, GlobalArgs};
use crate::config::AppConfig;
use crate::constants::cli as cli_limits;
use crate::errors::{AppError, Result};

/// Apply the global CLI overrides on top of the loaded configuration
pub fn apply_overrides(config: &mut AppConfig, global: &GlobalArgs) {
    if let Some(provider) = global.provider {
        debug!("Provider overridden on command line: {}", provider);
        config.weather.provider = provider;
    }
    if let Some(ttl_ms) = global.ttl_ms {
        debug!("TTL overridden on command line: {}ms", ttl_ms);
        config.cache.ttl_ms = ttl_ms;
    }
}

fn build_service(config: &AppConfig) -> Result<WeatherCacheService> {
    let service = WeatherCacheService::from_settings(
        config.weather.provider,
        &config.ipma_settings(),
        config.cache_config(),
    )?;
    Ok(service)
}

/// Handle the forecast command
pub async fn handle_forecast(args: ForecastArgs, config: &AppConfig, json: bool) -> Result<()> {
    args.validate().map_err(AppError::generic)?;
    let service = build_service(config)?;

    let forecasts: BTreeMap<NaiveDate, Forecast> = match args.days {
        Some(days) => {
            info!("Fetching forecasts for the next {} days", days);
            service.get_forecasts_for_days(days).await
        }
        None => {
            let dates: HashSet<NaiveDate> = args.dates.iter().copied().collect();
            service.get_forecasts(&dates).await.into_iter().collect()
        }
    };

    let stats = if args.stats {
        Some(service.get_statistics().await)
    } else {
        None
    };

    if json {
        #[derive(Serialize)]
        struct ForecastReport<'a> {
            forecasts: &'a BTreeMap<NaiveDate, Forecast>,
            #[serde(skip_serializing_if = "Option::is_none")]
            stats: Option<&'a CacheStatistics>,
        }

        print_json(&ForecastReport {
            forecasts: &forecasts,
            stats: stats.as_ref(),
        })?;
        return Ok(());
    }

    for (date, forecast) in &forecasts {
        print_forecast(*date, forecast);
    }
    if let Some(stats) = &stats {
        println!();
        print_stats(stats);
    }
    Ok(())
}

/// Handle the cache-check command
///
/// Looks up today's forecast three times: cold, after `first_wait_ms`, and
/// after a further `second_wait_ms`. With waits straddling the TTL this
/// yields miss, hit, miss.
pub async fn handle_cache_check(
    args: CacheCheckArgs,
    config: &AppConfig,
    ttl_overridden: bool,
    json: bool,
) -> Result<()> {
    let mut config = config.clone();
    if !ttl_overridden {
        config.cache.ttl_ms = cli_limits::CACHE_CHECK_TTL_MS;
    }
    let service = build_service(&config)?;
    let today = service.today();

    info!("Testing weather cache with TTL: {}ms", config.cache.ttl_ms);

    info!("First request - expecting a cache miss");
    let first = service.get_forecast(today).await;

    tokio::time::sleep(Duration::from_millis(args.first_wait_ms)).await;
    info!(
        "Second request after {}ms - expecting a cache hit",
        args.first_wait_ms
    );
    let second = service.get_forecast(today).await;

    tokio::time::sleep(Duration::from_millis(args.second_wait_ms)).await;
    info!(
        "Third request after {}ms - expecting a miss if past the TTL",
        args.first_wait_ms + args.second_wait_ms
    );
    let third = service.get_forecast(today).await;

    let stats = service.get_statistics().await;

    if json {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct CacheCheckReport<'a> {
            result: &'a str,
            forecasts_match: bool,
            cache_stats: &'a CacheStatistics,
        }

        print_json(&CacheCheckReport {
            result: "Test completed",
            forecasts_match: first == second && second == third,
            cache_stats: &stats,
        })?;
        return Ok(());
    }

    print_forecast(today, &first);
    println!();
    print_stats(&stats);
    Ok(())
}

/// Handle the config command
pub async fn handle_config(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init { path } => {
            let (path, created) = AppConfig::initialize(path).await?;
            if created {
                println!("Created default configuration file:");
            } else {
                println!("Configuration file already exists:");
            }
            println!("   {}", path.display());
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::generic(format!("Failed to render JSON: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

fn print_forecast(date: NaiveDate, forecast: &Forecast) {
    println!(
        "{}  {:<26} {:>5.1}°C - {:>5.1}°C  precipitation {}",
        date,
        forecast.description,
        forecast.min_temperature,
        forecast.max_temperature,
        forecast.precipitation_probability
    );
}

fn print_stats(stats: &CacheStatistics) {
    println!("Cache statistics:");
    println!("  Hits:            {}", stats.hits);
    println!("  Misses:          {}", stats.misses);
    println!("  Hit rate:        {:.1}%", stats.hit_rate());
    println!("  Entries:         {}", stats.total_entries);
    println!("  Valid entries:   {}", stats.valid_entries);
    println!("  Expired entries: {}", stats.expired_entries);
    println!("  TTL:             {}ms", stats.ttl_millis);
}
