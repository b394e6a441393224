//! `weathertool` - the `getWeather` tool for chat agents
//!
//! Resolves a free-text location to coordinates with OpenWeatherMap
//! geocoding, fetches the Open-Meteo forecast for them and returns the
//! forecast with the place name attached.

pub mod config;
pub mod error;
pub mod geocoding;
pub mod location_resolver;
pub mod models;
pub mod summary;
pub mod telemetry;
pub mod tool;
pub mod weather;

// Re-export core types for public API
pub use config::{ApiKeySource, WeatherToolConfig};
pub use error::{Provider, WeatherError, WeatherToolFailure};
pub use geocoding::{Geocoder, GeocodingValidation, OpenWeatherMapGeocoder};
pub use location_resolver::LocationWeatherResolver;
pub use models::{ForecastResult, GeocodedLocation, LocationDetails, LocationQuery, WeatherToolOutput};
pub use summary::WeatherSummary;
pub use tool::{GetWeatherTool, ToolDefinition};
pub use weather::{ForecastProvider, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
