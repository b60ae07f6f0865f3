//! Short-range forecast models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{estimate_risk, RiskLevel, WeatherSnapshot};

/// Precipitation probability (%) at which a forecast day counts as rainy
pub const RAIN_PROBABILITY_THRESHOLD: f64 = 50.0;

/// One day of provider forecast data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyConditions {
    pub date: NaiveDate,
    pub temperature_max: Option<f64>,
    pub wind_max: Option<f64>,
    /// Maximum precipitation probability in %
    pub precipitation_probability: Option<f64>,
}

/// One future day's assessment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub score: u8,
    pub level: RiskLevel,
}

/// Score each forecast day.
///
/// Daily data carries no humidity or air quality, so those come from the
/// current snapshot; missing daily values fall back to the current
/// temperature and wind and to a dry day.
pub fn build_forecast(days: &[DailyConditions], current: &WeatherSnapshot) -> Vec<ForecastDay> {
    days.iter()
        .map(|day| {
            let temperature = finite(day.temperature_max).unwrap_or(current.temperature);
            let wind = finite(day.wind_max).unwrap_or(current.wind);
            let rain_probability = finite(day.precipitation_probability).unwrap_or(0.0);
            let precipitation = if rain_probability >= RAIN_PROBABILITY_THRESHOLD {
                1.0
            } else {
                0.0
            };

            let result = estimate_risk(
                day.date,
                temperature,
                current.humidity,
                wind,
                precipitation,
                current.pm10,
                current.pm25,
            );
            ForecastDay {
                date: day.date,
                score: result.score,
                level: result.level,
            }
        })
        .collect()
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
