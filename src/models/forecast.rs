//! Forecast payload as returned by Open-Meteo
//!
//! The payload is kept as raw JSON so that every provider field reaches the
//! renderer. The accessors below read the handful of fields the crate itself
//! relies on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider-shaped forecast object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastResult(Map<String, Value>);

impl ForecastResult {
    /// Accepts any JSON object; anything else is `None`
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    fn section(&self, section: &str, field: &str) -> Option<&Value> {
        self.0.get(section)?.get(field)
    }

    fn string_series(&self, section: &str, field: &str) -> Option<Vec<&str>> {
        self.section(section, field)?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    /// `current.temperature_2m`
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.section("current", "temperature_2m")?.as_f64()
    }

    /// `current.time`
    #[must_use]
    pub fn current_time(&self) -> Option<&str> {
        self.section("current", "time")?.as_str()
    }

    /// `current_units.temperature_2m`, e.g. "°C"
    #[must_use]
    pub fn temperature_unit(&self) -> Option<&str> {
        self.section("current_units", "temperature_2m")?.as_str()
    }

    /// `hourly.time`
    #[must_use]
    pub fn hourly_times(&self) -> Option<Vec<&str>> {
        self.string_series("hourly", "time")
    }

    /// `hourly.temperature_2m`
    #[must_use]
    pub fn hourly_temperatures(&self) -> Option<Vec<f64>> {
        self.section("hourly", "temperature_2m")?
            .as_array()?
            .iter()
            .map(Value::as_f64)
            .collect()
    }

    /// `daily.sunrise`
    #[must_use]
    pub fn sunrises(&self) -> Option<Vec<&str>> {
        self.string_series("daily", "sunrise")
    }

    /// `daily.sunset`
    #[must_use]
    pub fn sunsets(&self) -> Option<Vec<&str>> {
        self.string_series("daily", "sunset")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ForecastResult {
        ForecastResult::from_value(json!({
            "latitude": 23.8,
            "longitude": 90.4,
            "current_units": { "time": "iso8601", "temperature_2m": "°C" },
            "current": { "time": "2024-10-07T19:30", "temperature_2m": 29.3 },
            "hourly": {
                "time": ["2024-10-07T19:00", "2024-10-07T20:00"],
                "temperature_2m": [29.0, 28]
            },
            "daily": {
                "time": ["2024-10-07"],
                "sunrise": ["2024-10-07T05:51"],
                "sunset": ["2024-10-07T17:39"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let forecast = sample();
        assert_eq!(forecast.current_temperature(), Some(29.3));
        assert_eq!(forecast.current_time(), Some("2024-10-07T19:30"));
        assert_eq!(forecast.temperature_unit(), Some("°C"));
        assert_eq!(
            forecast.hourly_times().unwrap(),
            vec!["2024-10-07T19:00", "2024-10-07T20:00"]
        );
        assert_eq!(forecast.hourly_temperatures().unwrap(), vec![29.0, 28.0]);
        assert_eq!(forecast.sunrises().unwrap(), vec!["2024-10-07T05:51"]);
        assert_eq!(forecast.sunsets().unwrap(), vec!["2024-10-07T17:39"]);
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        let forecast = ForecastResult::from_value(json!({
            "hourly": { "time": ["2024-10-07T19:00", 5] }
        }))
        .unwrap();
        assert_eq!(forecast.current_temperature(), None);
        assert_eq!(forecast.hourly_times(), None);
        assert_eq!(forecast.sunrises(), None);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(ForecastResult::from_value(json!([1, 2, 3])).is_none());
        assert!(ForecastResult::from_value(json!("text")).is_none());
    }
}
