//! Classification of provider condition codes.

/// Broad weather condition derived from a provider condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    /// Codes 200 to 299.
    Thunderstorm,
    /// Codes 300 to 399.
    Drizzle,
    /// Codes 500 to 599.
    Rain,
    /// Codes 600 to 699.
    Snow,
    /// Codes 700 to 799: mist, smoke, haze, dust, fog and the like.
    Atmosphere,
    /// Code 800.
    Clear,
    /// Codes 801 to 804.
    Clouds,
    /// Anything else.
    Unknown,
}

impl WeatherCondition {
    /// Classifies a provider condition code.
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            200..=299 => Self::Thunderstorm,
            300..=399 => Self::Drizzle,
            500..=599 => Self::Rain,
            600..=699 => Self::Snow,
            700..=799 => Self::Atmosphere,
            800 => Self::Clear,
            801..=804 => Self::Clouds,
            _ => Self::Unknown,
        }
    }

    /// Name of the system symbol used to picture the condition.
    #[must_use]
    pub const fn symbol_name(self) -> &'static str {
        match self {
            Self::Thunderstorm => "cloud.bolt",
            Self::Drizzle => "cloud.drizzle",
            Self::Rain => "cloud.rain",
            Self::Snow => "cloud.snow",
            Self::Atmosphere => "cloud.fog",
            Self::Clear => "sun.max",
            Self::Clouds | Self::Unknown => "cloud",
        }
    }
}
