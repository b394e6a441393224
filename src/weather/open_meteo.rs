use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::ForecastProvider;
use crate::models::ForecastResult;
use crate::{Provider, Result, WeatherError};

/// Variables requested from Open-Meteo on every call
const FORECAST_QUERY: &str =
    "current=temperature_2m&hourly=temperature_2m&daily=sunrise,sunset&timezone=auto";

/// Open-Meteo forecast client (no API key required)
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn request_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&{}",
            self.base_url, latitude, longitude, FORECAST_QUERY
        )
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<ForecastResult> {
        info!(
            "Getting forecast for coordinates: {:.4}, {:.4}",
            latitude, longitude
        );
        let start_time = Instant::now();

        let url = self.request_url(latitude, longitude);
        debug!("OpenMeteo API request URL: {}", url);

        let transport = |source: reqwest::Error| WeatherError::Transport {
            provider: Provider::Forecast,
            source,
        };

        let response = self.client.get(&url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            debug!("OpenMeteo API returned status {}", status);
            return Err(WeatherError::from_status(Provider::Forecast, status));
        }

        let body = response.bytes().await.map_err(transport)?;

        let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
            WeatherError::invalid_response(Provider::Forecast, format!("not valid JSON: {e}"))
        })?;

        let forecast = ForecastResult::from_value(value).ok_or_else(|| {
            WeatherError::invalid_response(Provider::Forecast, "expected a JSON object")
        })?;

        let total_duration = start_time.elapsed();
        info!(
            "Successfully retrieved forecast in {:.3}s",
            total_duration.as_secs_f64()
        );

        if total_duration.as_secs() > 5 {
            warn!(
                "Slow forecast API response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(forecast)
    }
}
