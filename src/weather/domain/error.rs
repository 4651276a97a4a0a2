//! Error types for weather lookups.

use thiserror::Error;

/// Failures of a location or weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The user has not granted access to their location.
    #[error("location access denied")]
    LocationDenied,

    /// No location fix is currently available.
    #[error("location is currently unavailable")]
    LocationUnavailable,

    /// The provider could not be reached.
    #[error("weather provider unreachable: {0}")]
    Network(String),

    /// The provider payload is not valid JSON of the expected shape.
    #[error("invalid weather payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The provider payload lists no weather condition.
    #[error("weather payload has no condition")]
    MissingCondition,
}
