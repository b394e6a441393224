//! Error types for the weather tool pipeline

use std::fmt;
use thiserror::Error;

/// External service a request was sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Geocoding,
    Forecast,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Geocoding => f.write_str("geocoding"),
            Provider::Forecast => f.write_str("forecast"),
        }
    }
}

/// Every way a weather lookup can fail before it reaches the tool boundary
#[derive(Error, Debug)]
pub enum WeatherError {
    /// The geocoding API key is not configured
    #[error("{var} environment variable is not set")]
    MissingCredential { var: String },

    /// Geocoding provider answered with a non-success status
    #[error("Geocoding API error: {status} {status_text}")]
    GeocodingProvider { status: u16, status_text: String },

    /// Geocoding returned nothing usable for the query
    #[error("Location \"{query}\" not found")]
    LocationNotFound { query: String },

    /// Forecast provider answered with a non-success status
    #[error("Weather API error: {status} {status_text}")]
    ForecastProvider { status: u16, status_text: String },

    /// The request never produced a response
    #[error("Network error calling {provider} API: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived but could not be used
    #[error("Invalid {provider} response: {message}")]
    InvalidResponse { provider: Provider, message: String },

    /// Caller-supplied input was rejected
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl WeatherError {
    pub fn missing_credential<S: Into<String>>(var: S) -> Self {
        Self::MissingCredential { var: var.into() }
    }

    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    pub fn invalid_response<S: Into<String>>(provider: Provider, message: S) -> Self {
        Self::InvalidResponse {
            provider,
            message: message.into(),
        }
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Build the provider error matching `provider` from an HTTP status
    #[must_use]
    pub fn from_status(provider: Provider, status: reqwest::StatusCode) -> Self {
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        match provider {
            Provider::Geocoding => Self::GeocodingProvider {
                status: status.as_u16(),
                status_text,
            },
            Provider::Forecast => Self::ForecastProvider {
                status: status.as_u16(),
                status_text,
            },
        }
    }

    /// True when the caller has to change their input rather than their setup
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            WeatherError::LocationNotFound { .. } | WeatherError::InvalidInput { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::MissingCredential { .. } | WeatherError::Config { .. } => {
                "Weather lookups are not configured. Please check the API key setup.".to_string()
            }
            WeatherError::LocationNotFound { query } => {
                format!("Couldn't find a place called \"{query}\". Try a different name.")
            }
            WeatherError::GeocodingProvider { .. }
            | WeatherError::ForecastProvider { .. }
            | WeatherError::Transport { .. }
            | WeatherError::InvalidResponse { .. } => {
                "The weather service is unavailable right now. Please try again later."
                    .to_string()
            }
            WeatherError::InvalidInput { message } => format!("Invalid input: {message}"),
        }
    }
}

/// The single failure kind the agent sees for a `getWeather` call
#[derive(Error, Debug)]
#[error("Failed to get weather: {source}")]
pub struct WeatherToolFailure {
    #[from]
    source: WeatherError,
}

impl WeatherToolFailure {
    /// The underlying cause
    #[must_use]
    pub fn kind(&self) -> &WeatherError {
        &self.source
    }

    #[must_use]
    pub fn into_inner(self) -> WeatherError {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_provider_error_messages() {
        let err = WeatherError::from_status(Provider::Geocoding, StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Geocoding API error: 401 Unauthorized");

        let err = WeatherError::from_status(Provider::Forecast, StatusCode::BAD_GATEWAY);
        assert!(matches!(
            err,
            WeatherError::ForecastProvider { status: 502, .. }
        ));
        assert_eq!(err.to_string(), "Weather API error: 502 Bad Gateway");
    }

    #[test]
    fn test_location_not_found_mentions_query() {
        let err = WeatherError::location_not_found("Atlantis");
        assert_eq!(err.to_string(), "Location \"Atlantis\" not found");
        assert!(err.is_user_error());
        assert!(err.user_message().contains("Atlantis"));
    }

    #[test]
    fn test_missing_credential_is_not_user_error() {
        let err = WeatherError::missing_credential("OPENWEATHERMAP_API_KEY");
        assert_eq!(
            err.to_string(),
            "OPENWEATHERMAP_API_KEY environment variable is not set"
        );
        assert!(!err.is_user_error());
        assert!(err.user_message().contains("not configured"));
    }

    #[test]
    fn test_tool_failure_wraps_cause() {
        let failure = WeatherToolFailure::from(WeatherError::location_not_found("Nowhere"));
        assert_eq!(
            failure.to_string(),
            "Failed to get weather: Location \"Nowhere\" not found"
        );
        assert!(matches!(
            failure.kind(),
            WeatherError::LocationNotFound { .. }
        ));
        assert!(std::error::Error::source(&failure).is_some());
    }
}
