//! Common types used across the workspace

use serde::{Deserialize, Serialize};

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Japanese,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::English => "en",
        }
    }

    /// Parse a language code, defaulting to Japanese for anything unknown
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Language::English,
            _ => Language::Japanese,
        }
    }
}

/// A selectable location for the primary risk view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub coordinates: GpsCoordinates,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates: GpsCoordinates::new(latitude, longitude),
        }
    }
}

/// Id given to the ad-hoc location produced by a geolocation request
pub const CURRENT_POSITION_ID: &str = "current";

/// Preset locations offered for the primary view
pub fn preset_locations() -> Vec<Location> {
    vec![
        Location::new("tokyo", "東京", 35.6895, 139.6917),
        Location::new("yokohama", "横浜", 35.4437, 139.6380),
        Location::new("osaka", "大阪", 34.6937, 135.5023),
        Location::new("nagoya", "名古屋", 35.1815, 136.9066),
        Location::new("sapporo", "札幌", 43.0618, 141.3545),
        Location::new("sendai", "仙台", 38.2682, 140.8694),
        Location::new("fukuoka", "福岡", 33.5904, 130.4017),
    ]
}
