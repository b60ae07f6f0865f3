//! Multi-city comparative risk map
//!
//! The same weather should not imply the same pollen load everywhere. Each
//! city carries a fixed suitability coefficient for the dominant taxa which
//! blends its raw weather-driven score toward a low baseline.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{estimate_snapshot_risk, level_for_score, RiskLevel, WeatherSnapshot};
use crate::scalar::{clamp, to_score};
use crate::types::GpsCoordinates;

/// Score that low-suitability cities are pulled toward
pub const MAP_BASELINE_SCORE: f64 = 14.0;

/// Floor for effective suitability, so every city keeps some weather signal
pub const MIN_EFFECTIVE_SUITABILITY: f64 = 0.15;

/// Static location descriptor for the map
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapCity {
    pub id: String,
    pub name: String,
    pub name_ja: String,
    pub lat: f64,
    pub lon: f64,
    pub region: String,
    /// Calibration constant in [0, 1]
    pub suitability: f64,
}

impl MapCity {
    fn new(
        id: &str,
        name: &str,
        name_ja: &str,
        lat: f64,
        lon: f64,
        region: &str,
        suitability: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            name_ja: name_ja.to_string(),
            lat,
            lon,
            region: region.to_string(),
            suitability,
        }
    }

    pub fn coordinates(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.lat, self.lon)
    }
}

/// A map city with its live assessment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityRiskPoint {
    #[serde(flatten)]
    pub city: MapCity,
    pub score: u8,
    pub level: RiskLevel,
    pub temperature: f64,
    pub humidity: f64,
    pub wind: f64,
    pub precipitation: f64,
}

/// Cities shown on the comparative map
pub fn map_cities() -> Vec<MapCity> {
    vec![
        MapCity::new("sapporo", "Sapporo", "札幌", 43.0618, 141.3545, "Hokkaido", 0.3),
        MapCity::new("sendai", "Sendai", "仙台", 38.2682, 140.8694, "Tohoku", 0.75),
        MapCity::new("tokyo", "Tokyo", "東京", 35.6895, 139.6917, "Kanto", 1.0),
        MapCity::new("niigata", "Niigata", "新潟", 37.9162, 139.0364, "Chubu", 0.6),
        MapCity::new("nagoya", "Nagoya", "名古屋", 35.1815, 136.9066, "Chubu", 0.9),
        MapCity::new("osaka", "Osaka", "大阪", 34.6937, 135.5023, "Kansai", 0.85),
        MapCity::new("hiroshima", "Hiroshima", "広島", 34.3853, 132.4553, "Chugoku", 0.8),
        MapCity::new("kochi", "Kochi", "高知", 33.5597, 133.5311, "Shikoku", 0.9),
        MapCity::new("fukuoka", "Fukuoka", "福岡", 33.5904, 130.4017, "Kyushu", 0.75),
        MapCity::new("naha", "Naha", "那覇", 26.2124, 127.6809, "Okinawa", 0.05),
    ]
}

/// How strongly local suitability applies in a given month
pub fn month_scale(month: u32) -> f64 {
    match month {
        2..=4 => 1.0,
        5 => 0.78,
        8..=10 => 0.55,
        _ => 0.35,
    }
}

/// Blend a raw weather score toward the map baseline by suitability
pub fn adjust_map_risk_score(raw_score: u8, suitability: f64, month: u32) -> u8 {
    let effective = clamp(suitability * month_scale(month), MIN_EFFECTIVE_SUITABILITY, 1.0);
    to_score(f64::from(raw_score) * effective + MAP_BASELINE_SCORE * (1.0 - effective))
}

/// Score one city's snapshot and apply its suitability
pub fn city_risk_point(
    city: &MapCity,
    snapshot: &WeatherSnapshot,
    date: NaiveDate,
) -> CityRiskPoint {
    let raw = estimate_snapshot_risk(date, snapshot);
    let score = adjust_map_risk_score(raw.score, city.suitability, date.month());

    CityRiskPoint {
        city: city.clone(),
        score,
        level: level_for_score(score),
        temperature: snapshot.temperature,
        humidity: snapshot.humidity,
        wind: snapshot.wind,
        precipitation: snapshot.precipitation,
    }
}

/// Order map points by descending score. Ties keep their input order.
pub fn sort_city_points(points: &mut [CityRiskPoint]) {
    points.sort_by(|a, b| b.score.cmp(&a.score));
}
