//! Port contracts for weather lookups.

pub mod location;
pub mod source;

pub use location::LocationSource;
pub use source::WeatherSource;

#[cfg(test)]
pub use location::MockLocationSource;
#[cfg(test)]
pub use source::MockWeatherSource;
