//! Weather summary for rendering
//!
//! Derives what the weather card shows from a tool output: current
//! temperature, 24h high/low, day or night, the next few hours and a chart
//! window around "now". Open-Meteo times are local to the location
//! (`timezone=auto`), so they are compared as naive date-times.

use crate::models::{ForecastResult, WeatherToolOutput};
use crate::{Provider, Result, WeatherError};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Hours shown ahead of "now" in the compact strip
pub const DEFAULT_UPCOMING_HOURS: usize = 6;
/// Points in the temperature chart
const CHART_LENGTH: usize = 24;
/// Hours of history before "now" in the chart
const CHART_LOOKBACK: usize = 6;
/// Hourly samples considered for high/low
const HIGH_LOW_WINDOW: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub time: String,
    pub temperature: f64,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub location_name: Option<String>,
    /// Current temperature rounded up
    pub current_temperature: f64,
    pub unit: String,
    pub current_time: String,
    pub high: f64,
    pub low: f64,
    /// Between the first sunrise and sunset, inclusive
    pub is_day: bool,
    /// Next hours starting at the first sample not before `current_time`
    pub upcoming: Vec<HourlyPoint>,
    pub chart: Vec<HourlyPoint>,
}

impl WeatherSummary {
    pub fn from_output(output: &WeatherToolOutput, upcoming_hours: usize) -> Result<Self> {
        let mut summary = Self::from_forecast(&output.forecast, upcoming_hours)?;
        summary.location_name = Some(output.location_name.clone());
        Ok(summary)
    }

    pub fn from_forecast(forecast: &ForecastResult, upcoming_hours: usize) -> Result<Self> {
        let current_temperature = forecast
            .current_temperature()
            .ok_or_else(|| missing("current.temperature_2m"))?;
        let current_time = forecast
            .current_time()
            .ok_or_else(|| missing("current.time"))?;
        let times = forecast
            .hourly_times()
            .ok_or_else(|| missing("hourly.time"))?;
        let temperatures = forecast
            .hourly_temperatures()
            .ok_or_else(|| missing("hourly.temperature_2m"))?;
        let sunrise = forecast
            .sunrises()
            .and_then(|s| s.first().copied())
            .ok_or_else(|| missing("daily.sunrise"))?;
        let sunset = forecast
            .sunsets()
            .and_then(|s| s.first().copied())
            .ok_or_else(|| missing("daily.sunset"))?;

        if times.len() != temperatures.len() {
            return Err(WeatherError::invalid_response(
                Provider::Forecast,
                format!(
                    "hourly.time has {} entries but hourly.temperature_2m has {}",
                    times.len(),
                    temperatures.len()
                ),
            ));
        }

        let now = parse_time(current_time)?;
        let is_day = parse_time(sunrise)? <= now && now <= parse_time(sunset)?;

        let head = &temperatures[..temperatures.len().min(HIGH_LOW_WINDOW)];
        let (high, low) = if head.is_empty() {
            (current_temperature, current_temperature)
        } else {
            (
                head.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                head.iter().copied().fold(f64::INFINITY, f64::min),
            )
        };

        let mut current_index = None;
        for (i, time) in times.iter().enumerate() {
            if parse_time(time)? >= now {
                current_index = Some(i);
                break;
            }
        }

        let point = |i: usize| HourlyPoint {
            time: times[i].to_string(),
            temperature: temperatures[i],
            is_current: times[i] == current_time,
        };

        let upcoming = match current_index {
            Some(start) => (start..times.len().min(start.saturating_add(upcoming_hours)))
                .map(point)
                .collect(),
            None => Vec::new(),
        };

        let chart_start = current_index.map_or(0, |i| i.saturating_sub(CHART_LOOKBACK));
        let chart = (chart_start..times.len().min(chart_start.saturating_add(CHART_LENGTH)))
            .map(point)
            .collect();

        Ok(Self {
            location_name: None,
            current_temperature: round_up(current_temperature),
            unit: forecast.temperature_unit().unwrap_or("°C").to_string(),
            current_time: current_time.to_string(),
            high: round_up(high),
            low: round_up(low),
            is_day,
            upcoming,
            chart,
        })
    }

    /// Compact headline, e.g. "30°C H:37° L:23°"
    #[must_use]
    pub fn headline(&self) -> String {
        format!(
            "{}{} H:{}° L:{}°",
            self.current_temperature, self.unit, self.high, self.low
        )
    }
}

/// Ceiling without a negative zero, so -0.4 renders as "0"
fn round_up(value: f64) -> f64 {
    let v = value.ceil();
    if v == 0.0 { 0.0 } else { v }
}

fn missing(field: &str) -> WeatherError {
    WeatherError::invalid_response(Provider::Forecast, format!("missing or invalid {field}"))
}

fn parse_time(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| {
            WeatherError::invalid_response(
                Provider::Forecast,
                format!("unparseable time '{value}': {e}"),
            )
        })
}
