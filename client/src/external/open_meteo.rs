//! Open-Meteo client for weather and air-quality readings
//!
//! Readings are kept as raw JSON values; coercion and fallbacks happen in
//! the engine so every consumer applies the same rules.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shared::scalar::coerce_number;
use shared::{DailyConditions, GpsCoordinates, RawReadings};

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

const CURRENT_WEATHER_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,wind_speed_10m,precipitation";
const DAILY_FIELDS: &str = "temperature_2m_max,wind_speed_10m_max,precipitation_probability_max";
const AIR_QUALITY_FIELDS: &str = "pm10,pm2_5";
const FORECAST_DAYS: &str = "3";
const PROVIDER_TIMEZONE: &str = "Asia/Tokyo";

/// Current conditions plus the short daily forecast for one position.
/// `current.pm10`/`current.pm25` are always empty here.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    pub current: RawReadings,
    pub daily: Vec<DailyConditions>,
}

/// Current particulate readings for one position
#[derive(Debug, Clone, Default)]
pub struct AirQuality {
    pub pm10: Option<Value>,
    pub pm25: Option<Value>,
}

/// Weather/air-quality data provider
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_and_forecast(&self, position: GpsCoordinates) -> AppResult<Conditions>;

    async fn air_quality(&self, position: GpsCoordinates) -> AppResult<AirQuality>;
}

/// Open-Meteo API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    forecast_url: String,
    air_quality_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<Value>,
    relative_humidity_2m: Option<Value>,
    wind_speed_10m: Option<Value>,
    precipitation: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Value>,
    #[serde(default)]
    wind_speed_10m_max: Vec<Value>,
    #[serde(default)]
    precipitation_probability_max: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    current: Option<AirQualityBlock>,
}

#[derive(Debug, Deserialize)]
struct AirQualityBlock {
    pm10: Option<Value>,
    pm2_5: Option<Value>,
}

impl OpenMeteoClient {
    /// Create a client against the public endpoints
    pub fn new(timeout: Duration) -> AppResult<Self> {
        Self::with_base_urls(DEFAULT_FORECAST_URL, DEFAULT_AIR_QUALITY_URL, timeout)
    }

    /// Create a client with custom endpoints (for testing)
    pub fn with_base_urls(
        forecast_url: impl Into<String>,
        air_quality_url: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            forecast_url: forecast_url.into(),
            air_quality_url: air_quality_url.into(),
        })
    }

    pub fn from_config(config: &ProviderConfig) -> AppResult<Self> {
        Self::with_base_urls(
            config.forecast_url.clone(),
            config.air_quality_url.clone(),
            config.timeout(),
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("{} request failed: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "{} API error: {} - {}",
                what, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to parse {} response: {}", what, e)))
    }
}

fn position_query(position: GpsCoordinates) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", position.latitude.to_string()),
        ("longitude", position.longitude.to_string()),
    ]
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn current_and_forecast(&self, position: GpsCoordinates) -> AppResult<Conditions> {
        let mut query = position_query(position);
        query.extend([
            ("current", CURRENT_WEATHER_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
            ("wind_speed_unit", "ms".to_string()),
            ("timezone", PROVIDER_TIMEZONE.to_string()),
        ]);

        let data: ForecastResponse = self.get_json(&self.forecast_url, &query, "Weather").await?;
        Ok(convert_forecast_response(data))
    }

    async fn air_quality(&self, position: GpsCoordinates) -> AppResult<AirQuality> {
        let mut query = position_query(position);
        query.extend([
            ("current", AIR_QUALITY_FIELDS.to_string()),
            ("timezone", PROVIDER_TIMEZONE.to_string()),
        ]);

        let data: AirQualityResponse = self
            .get_json(&self.air_quality_url, &query, "Air quality")
            .await?;
        let current = data.current;
        Ok(AirQuality {
            pm10: current.as_ref().and_then(|c| c.pm10.clone()),
            pm25: current.and_then(|c| c.pm2_5),
        })
    }
}

fn convert_forecast_response(data: ForecastResponse) -> Conditions {
    let current = data
        .current
        .map(|c| RawReadings {
            temperature: c.temperature_2m,
            humidity: c.relative_humidity_2m,
            wind: c.wind_speed_10m,
            precipitation: c.precipitation,
            pm10: None,
            pm25: None,
        })
        .unwrap_or_default();

    let daily = data.daily.map(convert_daily).unwrap_or_default();

    Conditions { current, daily }
}

/// Days whose date cannot be parsed are skipped
fn convert_daily(daily: DailyBlock) -> Vec<DailyConditions> {
    let value_at = |values: &[Value], index: usize| values.get(index).and_then(coerce_number);

    daily
        .time
        .iter()
        .enumerate()
        .filter_map(|(index, time)| {
            let date = NaiveDate::parse_from_str(time, "%Y-%m-%d").ok()?;
            Some(DailyConditions {
                date,
                temperature_max: value_at(&daily.temperature_2m_max, index),
                wind_max: value_at(&daily.wind_speed_10m_max, index),
                precipitation_probability: value_at(&daily.precipitation_probability_max, index),
            })
        })
        .collect()
}
