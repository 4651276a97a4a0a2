//! Domain model for weather reports.

mod condition;
mod error;
mod report;

pub use condition::WeatherCondition;
pub use error::WeatherError;
pub use report::{Coordinates, WeatherReport};
