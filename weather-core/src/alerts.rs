use chrono::Utc;
use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt::Debug};

use crate::model::{Alert, AlertReport, Severity};

/// Demo alert table keyed by lowercased city name. Read-only for the process
/// lifetime; a real deployment would back `AlertSource` with a live feed.
static ALERTS: Lazy<HashMap<&'static str, Vec<Alert>>> = Lazy::new(|| {
    HashMap::from([
        (
            "miami",
            vec![Alert {
                kind: "Hurricane Watch".to_string(),
                severity: "high".to_string(),
                description: "Tropical storm may strengthen to hurricane".to_string(),
                expires: "2024-09-15T18:00:00Z".to_string(),
            }],
        ),
        (
            "denver",
            vec![Alert {
                kind: "Winter Storm Warning".to_string(),
                severity: "medium".to_string(),
                description: "6-10 inches of snow expected".to_string(),
                expires: "2024-12-22T12:00:00Z".to_string(),
            }],
        ),
    ])
});

/// Source of active alerts for a city.
pub trait AlertSource: Send + Sync + Debug {
    /// Alerts for `city_lower`; the caller has already lowercased the name.
    fn alerts_for(&self, city_lower: &str) -> Vec<Alert>;
}

/// The built-in demonstration data set.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAlertSource;

impl AlertSource for StaticAlertSource {
    fn alerts_for(&self, city_lower: &str) -> Vec<Alert> {
        ALERTS.get(city_lower).cloned().unwrap_or_default()
    }
}

/// Look up alerts for a city, optionally narrowed to one severity.
///
/// City matching is case-insensitive. Unknown cities yield an empty list;
/// this operation has no failure modes.
pub fn lookup_alerts(source: &dyn AlertSource, city: &str, severity: Severity) -> AlertReport {
    let mut alerts = source.alerts_for(&city.to_lowercase());

    if severity != Severity::All {
        alerts.retain(|alert| alert.severity == severity.as_str());
    }

    AlertReport { city: city.to_string(), alerts, checked_at: Utc::now().to_rfc3339() }
}
