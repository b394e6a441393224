//! Location weather resolution
//!
//! Turns free text into a forecast: geocode the text, label the match,
//! fetch the forecast for its coordinates and merge the two.

use crate::config::WeatherToolConfig;
use crate::geocoding::{Geocoder, OpenWeatherMapGeocoder};
use crate::models::{LocationQuery, WeatherToolOutput};
use crate::weather::{ForecastProvider, OpenMeteoClient};
use crate::{Result, WeatherError};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Geocode-then-forecast pipeline. Holds no mutable state, so one
/// instance can serve concurrent calls.
#[derive(Clone)]
pub struct LocationWeatherResolver {
    geocoder: Arc<dyn Geocoder>,
    forecaster: Arc<dyn ForecastProvider>,
}

impl LocationWeatherResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecaster: Arc<dyn ForecastProvider>) -> Self {
        Self {
            geocoder,
            forecaster,
        }
    }

    /// Wire up the OpenWeatherMap geocoder and Open-Meteo forecast client
    /// with one shared HTTP client
    pub fn from_config(config: &WeatherToolConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.http.user_agent.clone());
        if let Some(seconds) = config.http.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds.into()));
        }
        let client = builder
            .build()
            .map_err(|e| WeatherError::config(format!("Failed to create HTTP client: {e}")))?;

        let geocoder = OpenWeatherMapGeocoder::new(
            client.clone(),
            config.geocoding.base_url.clone(),
            config.geocoding.api_key_source(),
        );
        let forecaster = OpenMeteoClient::new(client, config.forecast.base_url.clone());

        Ok(Self::new(Arc::new(geocoder), Arc::new(forecaster)))
    }

    /// Resolve a location to its forecast with place metadata attached
    #[instrument(skip_all, fields(location = %location))]
    pub async fn resolve(&self, location: &LocationQuery) -> Result<WeatherToolOutput> {
        let start_time = Instant::now();

        let place = self.geocoder.geocode(location).await?;
        debug!(
            "Resolved location: {} at ({})",
            place.display_name(),
            place.format_coordinates()
        );

        let forecast = self
            .forecaster
            .forecast(place.latitude, place.longitude)
            .await?;

        let output = WeatherToolOutput::new(forecast, &place);
        info!(
            "Weather for '{}' resolved as {} in {:.3}s",
            location,
            output.location_name,
            start_time.elapsed().as_secs_f64()
        );

        Ok(output)
    }
}
