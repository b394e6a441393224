//! Location query and resolved place metadata

use crate::WeatherError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-text place description as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Wrap caller input. The text is passed to the geocoder unmodified;
    /// only empty or all-whitespace input is rejected.
    pub fn new<S: Into<String>>(text: S) -> crate::Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(WeatherError::invalid_input("Location cannot be empty"));
        }
        Ok(Self(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Best geocoding match for a query
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    pub name: String,
    /// Region or state; never blank
    pub state: Option<String>,
    pub country: String,
}

impl GeocodedLocation {
    #[must_use]
    pub fn new(
        latitude: f64,
        longitude: f64,
        name: String,
        state: Option<String>,
        country: String,
    ) -> Self {
        Self {
            latitude,
            longitude,
            name,
            state: state.filter(|s| !s.trim().is_empty()),
            country,
        }
    }

    /// Human-readable label, e.g. "Dhaka, Dhaka Division, Bangladesh"
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }

    #[must_use]
    pub fn details(&self) -> LocationDetails {
        LocationDetails {
            name: self.name.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Place metadata attached to the tool output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDetails {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn location(state: Option<&str>) -> GeocodedLocation {
        GeocodedLocation::new(
            48.8566,
            2.3522,
            "Paris".to_string(),
            state.map(str::to_string),
            "FR".to_string(),
        )
    }

    #[rstest]
    #[case(None, "Paris, FR")]
    #[case(Some(""), "Paris, FR")]
    #[case(Some("   "), "Paris, FR")]
    #[case(Some("\t\n"), "Paris, FR")]
    #[case(Some("Ile-de-France"), "Paris, Ile-de-France, FR")]
    fn test_display_name(#[case] state: Option<&str>, #[case] expected: &str) {
        assert_eq!(location(state).display_name(), expected);
    }

    #[test]
    fn test_blank_state_is_dropped() {
        let loc = location(Some("  "));
        assert_eq!(loc.state, None);

        let json = serde_json::to_value(loc.details()).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert!(json.get("state").is_none());
    }

    #[test]
    fn test_present_state_is_serialized() {
        let json = serde_json::to_value(location(Some("Ile-de-France")).details()).unwrap();
        assert_eq!(json["state"], "Ile-de-France");
    }

    #[test]
    fn test_query_rejects_blank_input() {
        assert!(LocationQuery::new("").is_err());
        assert!(matches!(
            LocationQuery::new("   "),
            Err(WeatherError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_query_passes_text_through() {
        let query = LocationQuery::new(" São Paulo ").unwrap();
        assert_eq!(query.as_str(), " São Paulo ");
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(location(None).format_coordinates(), "48.8566, 2.3522");
    }
}
