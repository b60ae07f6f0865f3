//! Weather and air-quality snapshot models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scalar::{finite_or, number_or};

/// Instantaneous conditions at a point.
///
/// Every field is finite once constructed through [`WeatherSnapshot::from_raw`]
/// or [`WeatherSnapshot::sanitized`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind: f64,
    /// Precipitation in mm
    pub precipitation: f64,
    /// PM10 in µg/m³
    pub pm10: f64,
    /// PM2.5 in µg/m³
    pub pm25: f64,
}

/// Values substituted for missing or non-finite readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotFallback {
    pub temperature: f64,
    pub humidity: f64,
    pub wind: f64,
    pub precipitation: f64,
    pub pm10: f64,
    pub pm25: f64,
}

impl SnapshotFallback {
    /// Fallbacks for the user's selected location
    pub const PRIMARY: SnapshotFallback = SnapshotFallback {
        temperature: 12.0,
        humidity: 50.0,
        wind: 2.0,
        precipitation: 0.0,
        pm10: 20.0,
        pm25: 10.0,
    };

    /// Fallbacks for map cities. Air quality is never queried per city, so
    /// pm10/pm25 are always taken from here.
    pub const MAP: SnapshotFallback = SnapshotFallback {
        temperature: 12.0,
        humidity: 50.0,
        wind: 2.0,
        precipitation: 0.0,
        pm10: 24.0,
        pm25: 13.0,
    };
}

impl Default for SnapshotFallback {
    fn default() -> Self {
        Self::PRIMARY
    }
}

/// Readings as they arrive from an external provider, before coercion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReadings {
    pub temperature: Option<Value>,
    pub humidity: Option<Value>,
    pub wind: Option<Value>,
    pub precipitation: Option<Value>,
    pub pm10: Option<Value>,
    pub pm25: Option<Value>,
}

impl WeatherSnapshot {
    /// Coerce raw provider readings, substituting fallbacks field by field
    pub fn from_raw(raw: &RawReadings, fallback: &SnapshotFallback) -> Self {
        Self {
            temperature: number_or(raw.temperature.as_ref(), fallback.temperature),
            humidity: number_or(raw.humidity.as_ref(), fallback.humidity),
            wind: number_or(raw.wind.as_ref(), fallback.wind),
            precipitation: number_or(raw.precipitation.as_ref(), fallback.precipitation),
            pm10: number_or(raw.pm10.as_ref(), fallback.pm10),
            pm25: number_or(raw.pm25.as_ref(), fallback.pm25),
        }
    }

    /// Replace any non-finite field with its fallback
    pub fn sanitized(self, fallback: &SnapshotFallback) -> Self {
        Self {
            temperature: finite_or(self.temperature, fallback.temperature),
            humidity: finite_or(self.humidity, fallback.humidity),
            wind: finite_or(self.wind, fallback.wind),
            precipitation: finite_or(self.precipitation, fallback.precipitation),
            pm10: finite_or(self.pm10, fallback.pm10),
            pm25: finite_or(self.pm25, fallback.pm25),
        }
    }

    /// Whether any precipitation is being reported
    pub fn is_raining(&self) -> bool {
        self.precipitation > 0.0
    }
}
