//! Weather provider port.

use crate::weather::domain::{Coordinates, WeatherError, WeatherReport};
use async_trait::async_trait;

/// Fetches the current weather at a position.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetches the report for `at`.
    ///
    /// Implementations typically decode the response body with
    /// [`WeatherReport::from_payload`].
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] when the provider cannot be reached or its
    /// payload cannot be decoded.
    async fn fetch(&self, at: Coordinates) -> Result<WeatherReport, WeatherError>;
}
