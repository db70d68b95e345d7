use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Unit system selection, affecting temperature, wind speed and visibility
/// formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(WeatherError::InvalidInput(
                "Units must be 'metric' or 'imperial'".to_string(),
            )),
        }
    }
}

/// Validated input for a current-weather lookup.
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    pub city: String,
    pub units: Units,
    pub detailed: bool,
}

impl WeatherQuery {
    /// Validate raw tool input into a query.
    ///
    /// The city check runs before the units check, so a call that is wrong on
    /// both reports the missing city. No provider is ever invoked with a
    /// query that failed here.
    pub fn parse(city: &str, units: &str, detailed: bool) -> Result<Self, WeatherError> {
        if city.is_empty() {
            return Err(WeatherError::InvalidInput("City name is required".to_string()));
        }

        let units = Units::try_from(units)?;

        Ok(Self { city: city.to_string(), units, detailed })
    }
}

/// Current conditions for one city, all fields pre-formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: String,
    pub feels_like: String,
    pub condition: String,
    pub humidity: String,
    pub wind: String,
    pub wind_direction: String,
    pub uv_index: String,
    pub visibility: String,
    pub pressure: String,
    pub updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Vec<ForecastDay>>,
}

/// One day of the extended forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub max_temp: String,
    pub min_temp: String,
    pub condition: String,
    pub rain_chance: String,
}

/// Severity filter for alert lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    All,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::All => "all",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Severity {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "all" => Ok(Severity::All),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(WeatherError::InvalidInput(
                "Severity must be 'all', 'high', 'medium' or 'low'".to_string(),
            )),
        }
    }
}

/// A single active alert. The wire key for the alert kind is `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
    pub description: String,
    pub expires: String,
}

/// Result of an alert lookup. Unknown cities produce an empty `alerts` list,
/// never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertReport {
    pub city: String,
    pub alerts: Vec<Alert>,
    pub checked_at: String,
}

/// Field a multi-city comparison ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonMetric {
    Temperature,
    Humidity,
    Wind,
    Conditions,
}

impl ComparisonMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonMetric::Temperature => "temperature",
            ComparisonMetric::Humidity => "humidity",
            ComparisonMetric::Wind => "wind",
            ComparisonMetric::Conditions => "conditions",
        }
    }
}

impl std::fmt::Display for ComparisonMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ComparisonMetric {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "temperature" => Ok(ComparisonMetric::Temperature),
            "humidity" => Ok(ComparisonMetric::Humidity),
            "wind" => Ok(ComparisonMetric::Wind),
            "conditions" => Ok(ComparisonMetric::Conditions),
            _ => Err(WeatherError::InvalidInput(
                "Metric must be 'temperature', 'humidity', 'wind' or 'conditions'".to_string(),
            )),
        }
    }
}

/// Per-city row of a comparison, taken from a metric-units report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitySummary {
    pub city: String,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
    pub condition: String,
}

/// Result of a multi-city comparison, sorted descending by the chosen metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub metric: String,
    pub cities: Vec<CitySummary>,
    pub timestamp: String,
}
