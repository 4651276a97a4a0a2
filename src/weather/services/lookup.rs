//! Location-then-weather lookup.

use crate::weather::{
    domain::{WeatherError, WeatherReport},
    ports::{LocationSource, WeatherSource},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves the device position and fetches its current weather.
#[derive(Debug)]
pub struct WeatherLookup<L, W>
where
    L: LocationSource,
    W: WeatherSource,
{
    location: Arc<L>,
    source: Arc<W>,
}

impl<L, W> Clone for WeatherLookup<L, W>
where
    L: LocationSource,
    W: WeatherSource,
{
    fn clone(&self) -> Self {
        Self {
            location: Arc::clone(&self.location),
            source: Arc::clone(&self.source),
        }
    }
}

impl<L, W> WeatherLookup<L, W>
where
    L: LocationSource,
    W: WeatherSource,
{
    /// Creates a lookup over the given ports.
    #[must_use]
    pub const fn new(location: Arc<L>, source: Arc<W>) -> Self {
        Self { location, source }
    }

    /// Resolves the position, then fetches its weather.
    ///
    /// # Errors
    ///
    /// Returns the first [`WeatherError`] raised by either port.
    pub async fn try_refresh(&self) -> Result<WeatherReport, WeatherError> {
        let at = self.location.current_location().await?;
        let report = self.source.fetch(at).await?;
        debug!(
            place = report.name(),
            condition = ?report.condition(),
            "weather refreshed"
        );
        Ok(report)
    }

    /// Best-effort [`Self::try_refresh`]: failures are logged and yield
    /// `None`.
    pub async fn refresh(&self) -> Option<WeatherReport> {
        match self.try_refresh().await {
            Ok(report) => Some(report),
            Err(err) => {
                warn!(error = %err, "weather lookup failed");
                None
            }
        }
    }
}
