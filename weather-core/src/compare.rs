use chrono::Utc;

use crate::{
    error::WeatherError,
    model::{CitySummary, ComparisonMetric, ComparisonReport, WeatherQuery},
    provider::WeatherProvider,
};

/// Upper bound on cities per comparison. Fetches run one at a time, so
/// latency is linear in the count.
const MAX_CITIES: usize = 5;

/// Fetch each city sequentially and rank the successes by `metric`.
///
/// Comparison always runs in metric units without the forecast, whatever the
/// caller's display preference. Cities whose lookup fails are dropped from
/// the result; if every lookup fails the comparison is empty, not an error.
pub async fn compare_weather(
    provider: &dyn WeatherProvider,
    cities: &[String],
    metric: ComparisonMetric,
) -> Result<ComparisonReport, WeatherError> {
    if cities.len() > MAX_CITIES {
        return Err(WeatherError::InvalidInput("Maximum 5 cities for comparison".to_string()));
    }

    if cities.is_empty() {
        return Err(WeatherError::InvalidInput("At least one city required".to_string()));
    }

    let mut summaries = Vec::new();

    for city in cities {
        let query = match WeatherQuery::parse(city, "metric", false) {
            Ok(query) => query,
            Err(err) => {
                tracing::warn!(city = %city, error = %err, "skipping invalid city");
                continue;
            }
        };

        match provider.fetch_weather(&query).await {
            Ok(report) => summaries.push(CitySummary {
                city: city.clone(),
                temperature: report.temperature,
                humidity: report.humidity,
                wind: report.wind,
                condition: report.condition,
            }),
            Err(err) => {
                tracing::warn!(city = %city, error = %err, "dropping city from comparison");
            }
        }
    }

    sort_by_metric(&mut summaries, metric);

    Ok(ComparisonReport {
        metric: metric.as_str().to_string(),
        cities: summaries,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Descending order by the number embedded in the formatted metric string.
/// `conditions` has no numeric ranking, so call order is preserved.
fn sort_by_metric(summaries: &mut [CitySummary], metric: ComparisonMetric) {
    if metric == ComparisonMetric::Conditions {
        return;
    }

    let key = |summary: &CitySummary| -> f64 {
        let raw = match metric {
            ComparisonMetric::Temperature => summary.temperature.trim_end_matches("°C"),
            ComparisonMetric::Humidity => summary.humidity.trim_end_matches('%'),
            ComparisonMetric::Wind => summary.wind.split_whitespace().next().unwrap_or(""),
            ComparisonMetric::Conditions => unreachable!(),
        };
        raw.parse().unwrap_or(f64::MIN)
    };

    summaries.sort_by(|a, b| key(b).total_cmp(&key(a)));
}
