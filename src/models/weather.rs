//! Combined tool output handed back to the agent

use super::{ForecastResult, GeocodedLocation, LocationDetails};
use serde::{Deserialize, Serialize};

/// Forecast payload with the resolved place attached.
///
/// Serializes flat: every forecast key at the top level plus
/// `locationName` and `locationDetails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherToolOutput {
    #[serde(flatten)]
    pub forecast: ForecastResult,
    pub location_name: String,
    pub location_details: LocationDetails,
}

impl WeatherToolOutput {
    /// Merge a forecast with its location. Location keys win over any
    /// identically named forecast keys.
    #[must_use]
    pub fn new(mut forecast: ForecastResult, location: &GeocodedLocation) -> Self {
        forecast.remove("locationName");
        forecast.remove("locationDetails");
        Self {
            forecast,
            location_name: location.display_name(),
            location_details: location.details(),
        }
    }
}
