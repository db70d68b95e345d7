use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::{
    error::WeatherError,
    model::{ForecastDay, Units, WeatherQuery, WeatherReport},
};

use super::WeatherProvider;

/// Hard per-request cutoff for the single outbound call; there is no retry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Forecast days returned when `detailed` is requested.
const FORECAST_DAYS: usize = 3;

/// Index of the ~midday entry in the provider's 3-hour forecast buckets.
const NOON_HOURLY_INDEX: usize = 4;

/// Client for the wttr.in JSON interface (`format=j1`).
#[derive(Debug, Clone)]
pub struct WttrProvider {
    base_url: String,
    http: Client,
}

impl WttrProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }

    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReport, WeatherError> {
        // City names may contain spaces and non-ASCII characters; they ride
        // in the URL path segment.
        let encoded_city = urlencoding::encode(&query.city);
        let url = format!("{}/{}", self.base_url, encoded_city);

        // `m` selects the unit system: empty for metric, "f" for imperial.
        let unit_param = match query.units {
            Units::Metric => "",
            Units::Imperial => "f",
        };

        tracing::debug!(city = %query.city, url = %url, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[("format", "j1"), ("m", unit_param)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| WeatherError::Transport(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(city = %query.city, status = status.as_u16(), "provider request failed");
            return Err(WeatherError::Upstream { status: status.as_u16() });
        }

        let body = res.text().await.map_err(|e| WeatherError::Transport(e.to_string()))?;

        let payload: Value =
            serde_json::from_str(&body).map_err(|e| WeatherError::Transport(e.to_string()))?;

        build_report(query, &payload)
    }
}

#[async_trait]
impl WeatherProvider for WttrProvider {
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport, WeatherError> {
        self.fetch(query).await
    }
}

/// Subset of the j1 payload this client consumes. Every leaf is string-typed
/// in the provider's format.
#[derive(Debug, Deserialize)]
struct WttrPayload {
    #[serde(default)]
    current_condition: Vec<WttrCurrent>,
    #[serde(default)]
    weather: Vec<WttrDay>,
}

#[derive(Debug, Deserialize)]
struct WttrCurrent {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "temp_F")]
    temp_f: String,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: String,
    #[serde(rename = "FeelsLikeF")]
    feels_like_f: String,
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<WttrValue>,
    humidity: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    #[serde(rename = "windspeedMiles")]
    windspeed_miles: String,
    #[serde(rename = "winddir16Point")]
    winddir_16_point: String,
    #[serde(rename = "uvIndex")]
    uv_index: String,
    visibility: String,
    #[serde(rename = "visibilityMiles")]
    visibility_miles: String,
    pressure: String,
}

#[derive(Debug, Deserialize)]
struct WttrValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct WttrDay {
    date: String,
    #[serde(rename = "maxtempC")]
    maxtemp_c: String,
    #[serde(rename = "maxtempF")]
    maxtemp_f: String,
    #[serde(rename = "mintempC")]
    mintemp_c: String,
    #[serde(rename = "mintempF")]
    mintemp_f: String,
    #[serde(default)]
    hourly: Vec<WttrHour>,
}

#[derive(Debug, Deserialize)]
struct WttrHour {
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<WttrValue>,
    #[serde(rename = "chanceofrain")]
    chance_of_rain: String,
}

/// Turn a parsed provider payload into a report. Pure over the payload, so
/// the schema handling is testable without a network.
fn build_report(query: &WeatherQuery, payload: &Value) -> Result<WeatherReport, WeatherError> {
    // The provider answers unknown locations with a string payload instead
    // of the documented object shape.
    if let Value::String(text) = payload {
        if text.contains("Unknown location") {
            return Err(WeatherError::UnknownLocation(query.city.clone()));
        }
        return Err(WeatherError::NoData(query.city.clone()));
    }

    let parsed: WttrPayload = serde_json::from_value(payload.clone())
        .map_err(|e| WeatherError::Transport(e.to_string()))?;

    let current = parsed
        .current_condition
        .first()
        .ok_or_else(|| WeatherError::NoData(query.city.clone()))?;

    let (temperature, feels_like, wind, visibility) = match query.units {
        Units::Metric => (
            format!("{}°C", current.temp_c),
            format!("{}°C", current.feels_like_c),
            format!("{} km/h", current.windspeed_kmph),
            format!("{} km", current.visibility),
        ),
        Units::Imperial => (
            format!("{}°F", current.temp_f),
            format!("{}°F", current.feels_like_f),
            format!("{} mph", current.windspeed_miles),
            format!("{} miles", current.visibility_miles),
        ),
    };

    let forecast = if query.detailed {
        Some(build_forecast(&parsed.weather, query.units)?)
    } else {
        None
    };

    Ok(WeatherReport {
        city: query.city.clone(),
        temperature,
        feels_like,
        condition: first_desc(&current.weather_desc),
        humidity: format!("{}%", current.humidity),
        wind,
        wind_direction: current.winddir_16_point.clone(),
        uv_index: current.uv_index.clone(),
        visibility,
        pressure: format!("{} mb", current.pressure),
        updated: Utc::now().to_rfc3339(),
        forecast,
    })
}

fn build_forecast(days: &[WttrDay], units: Units) -> Result<Vec<ForecastDay>, WeatherError> {
    days.iter()
        .take(FORECAST_DAYS)
        .map(|day| {
            // The representative condition for a day is the ~noon bucket.
            let noon = day.hourly.get(NOON_HOURLY_INDEX).ok_or_else(|| {
                WeatherError::Transport(format!(
                    "forecast for {} has no midday hourly entry",
                    day.date
                ))
            })?;

            let (max_temp, min_temp) = match units {
                Units::Metric => {
                    (format!("{}°C", day.maxtemp_c), format!("{}°C", day.mintemp_c))
                }
                Units::Imperial => {
                    (format!("{}°F", day.maxtemp_f), format!("{}°F", day.mintemp_f))
                }
            };

            Ok(ForecastDay {
                date: day.date.clone(),
                max_temp,
                min_temp,
                condition: first_desc(&noon.weather_desc),
                rain_chance: format!("{}%", noon.chance_of_rain),
            })
        })
        .collect()
}

fn first_desc(values: &[WttrValue]) -> String {
    values.first().map(|v| v.value.clone()).unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn current_entry(temp_c: &str) -> Value {
        json!({
            "temp_C": temp_c,
            "temp_F": "68",
            "FeelsLikeC": "19",
            "FeelsLikeF": "66",
            "weatherDesc": [{"value": "Partly cloudy"}],
            "humidity": "60",
            "windspeedKmph": "15",
            "windspeedMiles": "9",
            "winddir16Point": "NW",
            "uvIndex": "5",
            "visibility": "10",
            "visibilityMiles": "6",
            "pressure": "1012"
        })
    }

    fn hourly_entries(noon_desc: &str, noon_rain: &str) -> Value {
        let mut hours = Vec::new();
        for i in 0..8 {
            if i == NOON_HOURLY_INDEX {
                hours.push(json!({
                    "weatherDesc": [{"value": noon_desc}],
                    "chanceofrain": noon_rain
                }));
            } else {
                hours.push(json!({
                    "weatherDesc": [{"value": "Off-peak"}],
                    "chanceofrain": "0"
                }));
            }
        }
        Value::Array(hours)
    }

    fn query(units: Units, detailed: bool) -> WeatherQuery {
        WeatherQuery { city: "London".to_string(), units, detailed }
    }

    #[test]
    fn metric_report_formats_celsius() {
        let payload = json!({ "current_condition": [current_entry("20")] });

        let report = build_report(&query(Units::Metric, false), &payload).expect("report");

        assert_eq!(report.temperature, "20°C");
        assert_eq!(report.feels_like, "19°C");
        assert_eq!(report.wind, "15 km/h");
        assert_eq!(report.visibility, "10 km");
        assert_eq!(report.humidity, "60%");
        assert_eq!(report.pressure, "1012 mb");
        assert_eq!(report.condition, "Partly cloudy");
        assert!(report.forecast.is_none());
    }

    #[test]
    fn imperial_report_formats_fahrenheit() {
        let payload = json!({ "current_condition": [current_entry("20")] });

        let report = build_report(&query(Units::Imperial, false), &payload).expect("report");

        assert_eq!(report.temperature, "68°F");
        assert_eq!(report.wind, "9 mph");
        assert_eq!(report.visibility, "6 miles");
    }

    #[test]
    fn unknown_location_string_payload() {
        let payload = Value::String("Unknown location; please try ~Soul".to_string());

        let err = build_report(&query(Units::Metric, false), &payload).unwrap_err();

        assert_eq!(err.to_string(), "Unknown location: London");
    }

    #[test]
    fn other_string_payload_means_no_data() {
        let payload = Value::String("Sorry, we are out of queries".to_string());

        let err = build_report(&query(Units::Metric, false), &payload).unwrap_err();

        assert_eq!(err.to_string(), "No weather data available for London");
    }

    #[test]
    fn empty_current_condition_means_no_data() {
        let payload = json!({ "current_condition": [] });

        let err = build_report(&query(Units::Metric, false), &payload).unwrap_err();

        assert!(matches!(err, WeatherError::NoData(_)));
    }

    #[test]
    fn missing_current_condition_means_no_data() {
        let payload = json!({ "weather": [] });

        let err = build_report(&query(Units::Metric, false), &payload).unwrap_err();

        assert!(matches!(err, WeatherError::NoData(_)));
    }

    #[test]
    fn detailed_report_takes_three_days_and_noon_bucket() {
        let day = |date: &str| {
            json!({
                "date": date,
                "maxtempC": "22", "maxtempF": "72",
                "mintempC": "12", "mintempF": "54",
                "hourly": hourly_entries("Light rain", "45")
            })
        };
        let payload = json!({
            "current_condition": [current_entry("20")],
            "weather": [day("2024-06-01"), day("2024-06-02"), day("2024-06-03"), day("2024-06-04")]
        });

        let report = build_report(&query(Units::Metric, true), &payload).expect("report");

        let forecast = report.forecast.expect("forecast present");
        assert_eq!(forecast.len(), 3);
        assert_eq!(forecast[0].date, "2024-06-01");
        assert_eq!(forecast[0].max_temp, "22°C");
        assert_eq!(forecast[0].min_temp, "12°C");
        assert_eq!(forecast[0].condition, "Light rain");
        assert_eq!(forecast[0].rain_chance, "45%");
    }

    #[test]
    fn truncated_hourly_forecast_is_a_transport_error() {
        let payload = json!({
            "current_condition": [current_entry("20")],
            "weather": [{
                "date": "2024-06-01",
                "maxtempC": "22", "maxtempF": "72",
                "mintempC": "12", "mintempF": "54",
                "hourly": [{"weatherDesc": [{"value": "Clear"}], "chanceofrain": "0"}]
            }]
        });

        let err = build_report(&query(Units::Metric, true), &payload).unwrap_err();

        assert!(matches!(err, WeatherError::Transport(_)));
        assert!(err.to_string().starts_with("Failed to get weather"));
    }

    #[test]
    fn malformed_current_condition_is_a_transport_error() {
        let payload = json!({ "current_condition": [{"temp_C": "20"}] });

        let err = build_report(&query(Units::Metric, false), &payload).unwrap_err();

        assert!(matches!(err, WeatherError::Transport(_)));
    }
}
