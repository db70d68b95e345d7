use crate::{
    Config,
    error::WeatherError,
    model::{WeatherQuery, WeatherReport},
    provider::wttr::WttrProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod wttr;

/// Abstraction over weather data providers.
///
/// The comparator and the tool layer depend on this seam rather than on a
/// concrete client, and tests substitute a scripted implementation for the
/// real HTTP provider.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions (and optionally the forecast) for one city.
    ///
    /// Exactly one outbound call per invocation; no retry, no local state.
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport, WeatherError>;
}

/// Construct the default provider with the endpoint taken from config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(WttrProvider::new(config.resolved_base_url()))
}
