use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    schemars,
};
use serde::Deserialize;

use weather_core::{
    ComparisonMetric, Config, Severity, StaticAlertSource, WeatherError, WeatherProvider,
    WeatherQuery, WttrProvider, compare_weather, lookup_alerts,
};

/// Input for the current-weather lookup.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetWeatherInput {
    #[schemars(description = "City name (e.g., \"London\", \"New York\")")]
    pub city: String,
    #[schemars(description = "Temperature units: \"metric\" (°C) or \"imperial\" (°F); default metric")]
    pub units: Option<String>,
    #[schemars(description = "Include the three-day forecast (default: false)")]
    pub detailed: Option<bool>,
}

/// Input for the alert lookup.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetWeatherAlertsInput {
    #[schemars(description = "City name to check for alerts")]
    pub city: String,
    #[schemars(description = "Filter by severity: \"all\", \"high\", \"medium\", \"low\" (default: all)")]
    pub severity: Option<String>,
}

/// Input for the multi-city comparison.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompareWeatherInput {
    #[schemars(description = "Cities to compare (max 5)")]
    pub cities: Vec<String>,
    #[schemars(
        description = "What to compare: \"temperature\", \"humidity\", \"wind\", \"conditions\" (default: temperature)"
    )]
    pub metric: Option<String>,
}

/// MCP server exposing the three weather operations as tools.
///
/// Every tool answers with a JSON text payload: the success object, or
/// `{"error": ...}` when the operation failed.
#[derive(Debug, Clone)]
pub struct WeatherMcpServer {
    provider: WttrProvider,
    alerts: StaticAlertSource,
    pub tool_router: ToolRouter<Self>,
}

#[rmcp::tool_router]
impl WeatherMcpServer {
    /// Construct a server with the provider endpoint taken from config.
    pub fn new(config: &Config) -> Self {
        Self {
            provider: WttrProvider::new(config.resolved_base_url()),
            alerts: StaticAlertSource,
            tool_router: Self::tool_router(),
        }
    }

    #[rmcp::tool(
        description = "Get current weather for a city, optionally with a three-day forecast"
    )]
    async fn get_weather(&self, Parameters(input): Parameters<GetWeatherInput>) -> String {
        match self.get_weather_impl(input).await {
            Ok(output) => output,
            Err(err) => error_payload(&err),
        }
    }

    #[rmcp::tool(description = "Get active weather alerts and warnings for a city")]
    fn get_weather_alerts(&self, Parameters(input): Parameters<GetWeatherAlertsInput>) -> String {
        match self.get_weather_alerts_impl(input) {
            Ok(output) => output,
            Err(err) => error_payload(&err),
        }
    }

    #[rmcp::tool(description = "Compare current weather between up to five cities by one metric")]
    async fn compare_weather(&self, Parameters(input): Parameters<CompareWeatherInput>) -> String {
        match self.compare_weather_impl(input).await {
            Ok(output) => output,
            Err(err) => error_payload(&err),
        }
    }
}

impl WeatherMcpServer {
    async fn get_weather_impl(&self, input: GetWeatherInput) -> Result<String, WeatherError> {
        let query = WeatherQuery::parse(
            &input.city,
            input.units.as_deref().unwrap_or("metric"),
            input.detailed.unwrap_or(false),
        )?;

        let report = self.provider.fetch_weather(&query).await?;
        to_json(&report)
    }

    fn get_weather_alerts_impl(
        &self,
        input: GetWeatherAlertsInput,
    ) -> Result<String, WeatherError> {
        let severity = Severity::try_from(input.severity.as_deref().unwrap_or("all"))?;

        let report = lookup_alerts(&self.alerts, &input.city, severity);
        to_json(&report)
    }

    async fn compare_weather_impl(&self, input: CompareWeatherInput) -> Result<String, WeatherError> {
        let metric = ComparisonMetric::try_from(input.metric.as_deref().unwrap_or("temperature"))?;

        let report = compare_weather(&self.provider, &input.cities, metric).await?;
        to_json(&report)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, WeatherError> {
    serde_json::to_string_pretty(value).map_err(|e| WeatherError::Transport(e.to_string()))
}

/// Serialize an error as the `{"error": text}` object of the tool contract.
fn error_payload(err: &WeatherError) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}
