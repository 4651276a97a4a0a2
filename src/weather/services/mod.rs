//! Application services for weather lookups.

mod lookup;

pub use lookup::WeatherLookup;
