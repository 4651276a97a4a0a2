//! Current-weather lookup shown beside the daily task list.
//!
//! The planner never depends on weather: a failed lookup is logged and the
//! caller simply has nothing to display. No network client ships with the
//! crate; hosts provide [`ports::LocationSource`] and [`ports::WeatherSource`]
//! implementations.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
