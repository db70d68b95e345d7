use thiserror::Error;

/// Failure taxonomy for the tool operations.
///
/// Variants render to the exact text embedded in tool responses; the serving
/// layer converts every error into a normal `{"error": ...}` payload, so
/// nothing here ever crosses the tool boundary as a protocol failure.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Caller-supplied values failed validation before any I/O.
    #[error("{0}")]
    InvalidInput(String),

    /// The provider did not recognize the location.
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    /// The provider answered but carried no usable data for the city.
    #[error("No weather data available for {0}")]
    NoData(String),

    /// The provider returned a non-success HTTP status.
    #[error("Weather API error: {status}")]
    Upstream { status: u16 },

    /// Network, body or parse failure of any other kind.
    #[error("Failed to get weather: {0}")]
    Transport(String),
}
