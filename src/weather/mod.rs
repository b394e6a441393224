//! Forecast retrieval for resolved coordinates

use async_trait::async_trait;

use crate::Result;
use crate::models::ForecastResult;

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Fetches current, hourly and daily weather for a coordinate pair
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<ForecastResult>;
}
