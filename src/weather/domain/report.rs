//! Weather report decoded from the provider payload.

use super::{WeatherCondition, WeatherError};
use serde::Deserialize;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude, positive north.
    pub latitude: f64,
    /// Longitude, positive east.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a position.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Current weather at a named place.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    name: String,
    temperature_celsius: f64,
    condition_code: u32,
}

#[derive(Deserialize)]
struct Payload {
    name: String,
    main: MainReading,
    weather: Vec<ConditionReading>,
}

#[derive(Deserialize)]
struct MainReading {
    temp: f64,
}

#[derive(Deserialize)]
struct ConditionReading {
    id: u32,
}

impl WeatherReport {
    /// Creates a report.
    #[must_use]
    pub fn new(name: impl Into<String>, temperature_celsius: f64, condition_code: u32) -> Self {
        Self {
            name: name.into(),
            temperature_celsius,
            condition_code,
        }
    }

    /// Decodes a provider payload of the form
    /// `{"name": .., "main": {"temp": ..}, "weather": [{"id": ..}]}`.
    ///
    /// The first listed condition wins; unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Decode`] when the payload does not have that
    /// shape and [`WeatherError::MissingCondition`] when the condition list is
    /// empty.
    pub fn from_payload(payload: &str) -> Result<Self, WeatherError> {
        let decoded: Payload = serde_json::from_str(payload)?;
        let condition = decoded
            .weather
            .first()
            .ok_or(WeatherError::MissingCondition)?;
        Ok(Self::new(decoded.name, decoded.main.temp, condition.id))
    }

    /// Returns the place name reported by the provider.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the temperature in degrees Celsius.
    #[must_use]
    pub const fn temperature_celsius(&self) -> f64 {
        self.temperature_celsius
    }

    /// Returns the raw provider condition code.
    #[must_use]
    pub const fn condition_code(&self) -> u32 {
        self.condition_code
    }

    /// Returns the classified condition.
    #[must_use]
    pub const fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_code(self.condition_code)
    }

    /// Temperature with one decimal, as displayed.
    #[must_use]
    pub fn temperature_label(&self) -> String {
        format!("{:.1}", self.temperature_celsius)
    }
}
