//! Core library for the weather MCP server.
//!
//! This crate defines:
//! - Configuration handling (provider base URL override)
//! - Abstraction over weather providers and the wttr.in client
//! - Alert lookup backed by a static table
//! - The sequential multi-city comparator
//! - Shared domain models and the error taxonomy
//!
//! It is used by `weather-mcp`, but can also be reused by other binaries or
//! services.

pub mod alerts;
pub mod compare;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use alerts::{AlertSource, StaticAlertSource, lookup_alerts};
pub use compare::compare_weather;
pub use config::Config;
pub use error::WeatherError;
pub use model::{
    Alert, AlertReport, CitySummary, ComparisonMetric, ComparisonReport, ForecastDay, Severity,
    Units, WeatherQuery, WeatherReport,
};
pub use provider::{WeatherProvider, provider_from_config, wttr::WttrProvider};
