//! Data models for the weather tool
//!
//! - Location: query text and resolved place metadata
//! - Forecast: raw provider forecast with typed accessors
//! - Weather: the combined output returned to the agent

pub mod forecast;
pub mod location;
pub mod weather;

pub use forecast::ForecastResult;
pub use location::{GeocodedLocation, LocationDetails, LocationQuery};
pub use weather::WeatherToolOutput;
