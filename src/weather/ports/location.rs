//! Device location port.

use crate::weather::domain::{Coordinates, WeatherError};
use async_trait::async_trait;

/// Provides the device's current position.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Resolves the current position.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::LocationDenied`] when access has not been
    /// granted and [`WeatherError::LocationUnavailable`] when no fix exists.
    async fn current_location(&self) -> Result<Coordinates, WeatherError>;
}
