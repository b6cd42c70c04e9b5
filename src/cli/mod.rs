//! Command-line interface components
//!
//! Argument parsing and command handlers for the meal_weather binary.

pub mod args;
pub mod commands;

pub use args::{
    CacheCheckArgs, Cli, Commands, ConfigAction, ConfigArgs, ForecastArgs, GlobalArgs,
};
pub use commands::{apply_overrides, handle_cache_check, handle_config, handle_forecast};
