//! `getWeather` tool exposed to the chat agent

use crate::location_resolver::LocationWeatherResolver;
use crate::models::{LocationQuery, WeatherToolOutput};
use crate::{Provider, WeatherError, WeatherToolFailure};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::error;

pub const TOOL_NAME: &str = "getWeather";
pub const TOOL_DESCRIPTION: &str = "Get the current weather and forecast for a location";
const LOCATION_DESCRIPTION: &str = "The location to get weather for (city name, address, etc.)";

/// Name, purpose and parameter schema as handed to the model runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the arguments object
    pub parameters: Value,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GetWeatherArgs {
    location: String,
}

/// Agent-facing wrapper around [`LocationWeatherResolver`]. This is the
/// only place errors are logged; callers see one failure type.
#[derive(Clone)]
pub struct GetWeatherTool {
    resolver: LocationWeatherResolver,
}

impl GetWeatherTool {
    #[must_use]
    pub fn new(resolver: LocationWeatherResolver) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub fn definition() -> ToolDefinition {
        ToolDefinition {
            name: TOOL_NAME.to_string(),
            description: TOOL_DESCRIPTION.to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": LOCATION_DESCRIPTION
                    }
                },
                "required": ["location"],
                "additionalProperties": false
            }),
        }
    }

    /// Run a tool call with raw JSON arguments, as issued by the model
    pub async fn execute(&self, arguments: Value) -> Result<Value, WeatherToolFailure> {
        let args: GetWeatherArgs = serde_json::from_value(arguments)
            .map_err(|e| Self::fail(WeatherError::invalid_input(e.to_string())))?;

        let output = self.get_weather(&args.location).await?;

        serde_json::to_value(output).map_err(|e| {
            Self::fail(WeatherError::invalid_response(
                Provider::Forecast,
                format!("Failed to encode weather output: {e}"),
            ))
        })
    }

    pub async fn get_weather(&self, location: &str) -> Result<WeatherToolOutput, WeatherToolFailure> {
        let query = LocationQuery::new(location).map_err(Self::fail)?;
        self.resolver.resolve(&query).await.map_err(Self::fail)
    }

    fn fail(err: WeatherError) -> WeatherToolFailure {
        error!(error = %err, user_error = err.is_user_error(), "Weather tool error");
        WeatherToolFailure::from(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::Geocoder;
    use crate::models::{ForecastResult, GeocodedLocation};
    use crate::weather::ForecastProvider;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StaticGeocoder(Option<GeocodedLocation>);

    #[async_trait]
    impl Geocoder for StaticGeocoder {
        async fn geocode(&self, query: &LocationQuery) -> crate::Result<GeocodedLocation> {
            self.0
                .clone()
                .ok_or_else(|| WeatherError::location_not_found(query.as_str()))
        }
    }

    struct StaticForecast;

    #[async_trait]
    impl ForecastProvider for StaticForecast {
        async fn forecast(&self, _: f64, _: f64) -> crate::Result<ForecastResult> {
            Ok(ForecastResult::from_value(json!({ "timezone": "Europe/Paris" })).unwrap())
        }
    }

    fn tool(found: bool) -> GetWeatherTool {
        let paris = GeocodedLocation::new(
            48.85,
            2.35,
            "Paris".to_string(),
            None,
            "FR".to_string(),
        );
        let geocoder = StaticGeocoder(found.then_some(paris));
        GetWeatherTool::new(LocationWeatherResolver::new(
            Arc::new(geocoder),
            Arc::new(StaticForecast),
        ))
    }

    #[test]
    fn test_definition() {
        let definition = GetWeatherTool::definition();
        assert_eq!(definition.name, "getWeather");
        assert_eq!(
            definition.description,
            "Get the current weather and forecast for a location"
        );
        assert_eq!(definition.parameters["required"], json!(["location"]));
        assert_eq!(
            definition.parameters["properties"]["location"]["type"],
            "string"
        );
    }

    #[tokio::test]
    async fn test_execute_returns_flat_json() {
        let value = tool(true)
            .execute(json!({ "location": "Paris" }))
            .await
            .unwrap();

        assert_eq!(value["timezone"], "Europe/Paris");
        assert_eq!(value["locationName"], "Paris, FR");
        assert_eq!(
            value["locationDetails"],
            json!({ "name": "Paris", "country": "FR" })
        );
    }

    #[tokio::test]
    async fn test_failures_are_wrapped() {
        let failure = tool(false).get_weather("Atlantis").await.unwrap_err();
        assert_eq!(
            failure.to_string(),
            "Failed to get weather: Location \"Atlantis\" not found"
        );
        assert!(matches!(
            failure.kind(),
            WeatherError::LocationNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_bad_arguments_are_rejected() {
        for args in [
            json!({}),
            json!({ "location": 42 }),
            json!({ "location": "  " }),
            json!({ "location": "Paris", "units": "metric" }),
        ] {
            let failure = tool(true).execute(args).await.unwrap_err();
            assert!(matches!(failure.kind(), WeatherError::InvalidInput { .. }));
            assert!(failure.to_string().starts_with("Failed to get weather:"));
        }
    }
}
