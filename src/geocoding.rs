//! Forward geocoding: free text to coordinates and place metadata.
//! Uses the OpenWeatherMap direct geocoding API, which needs an API key.

use crate::config::ApiKeySource;
use crate::models::{GeocodedLocation, LocationQuery};
use crate::{Provider, Result, WeatherError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Resolves a location query to its best match
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &LocationQuery) -> Result<GeocodedLocation>;
}

/// One candidate in the geocoding response array
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodingMatch {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<GeocodingMatch> for GeocodedLocation {
    fn from(m: GeocodingMatch) -> Self {
        GeocodedLocation::new(m.lat, m.lon, m.name, m.state, m.country)
    }
}

/// Outcome of checking a geocoding body against the expected shape
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodingValidation {
    /// Well-formed, non-empty array, in provider rank order
    Matches(Vec<GeocodingMatch>),
    /// Well-formed but no candidates
    Empty,
    /// Not JSON, not an array, or an element missing required fields
    Malformed(String),
}

/// Parse and validate a raw geocoding response body
#[must_use]
pub fn validate_geocoding_response(body: &[u8]) -> GeocodingValidation {
    match serde_json::from_slice::<Vec<GeocodingMatch>>(body) {
        Ok(matches) if matches.is_empty() => GeocodingValidation::Empty,
        Ok(matches) => GeocodingValidation::Matches(matches),
        Err(e) => GeocodingValidation::Malformed(e.to_string()),
    }
}

/// OpenWeatherMap direct geocoding client
#[derive(Debug, Clone)]
pub struct OpenWeatherMapGeocoder {
    client: Client,
    base_url: String,
    api_key: ApiKeySource,
}

impl OpenWeatherMapGeocoder {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: ApiKeySource) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn request_url(&self, query: &LocationQuery, api_key: &str) -> String {
        format!(
            "{}/direct?q={}&limit=1&appid={}",
            self.base_url,
            urlencoding::encode(query.as_str()),
            urlencoding::encode(api_key)
        )
    }
}

#[async_trait]
impl Geocoder for OpenWeatherMapGeocoder {
    #[instrument(skip_all, fields(location = %query))]
    async fn geocode(&self, query: &LocationQuery) -> Result<GeocodedLocation> {
        let api_key = self.api_key.resolve()?;

        info!("Geocoding location: '{}'", query);
        let start_time = Instant::now();

        let url = self.request_url(query, &api_key);
        debug!(
            "Geocoding request URL: {}",
            url.split("appid=").next().unwrap_or_default()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| WeatherError::Transport {
                provider: Provider::Geocoding,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("Geocoding API returned status {}", status);
            return Err(WeatherError::from_status(Provider::Geocoding, status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| WeatherError::Transport {
                provider: Provider::Geocoding,
                source,
            })?;

        let best = match validate_geocoding_response(&body) {
            GeocodingValidation::Matches(matches) => {
                debug!(
                    "Geocoding results: {:?}",
                    matches
                        .iter()
                        .map(|m| format!("{} ({:.4}, {:.4})", m.name, m.lat, m.lon))
                        .collect::<Vec<_>>()
                );
                matches.into_iter().next()
            }
            GeocodingValidation::Empty => {
                debug!("No results found for location '{}'", query);
                None
            }
            GeocodingValidation::Malformed(reason) => {
                debug!("Unusable geocoding response for '{}': {}", query, reason);
                None
            }
        };

        let location: GeocodedLocation = best
            .ok_or_else(|| WeatherError::location_not_found(query.as_str()))?
            .into();

        info!(
            "Geocoded '{}' to {} ({}) in {:.3}s",
            query,
            location.display_name(),
            location.format_coordinates(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(location)
    }
}
