//! Configuration management for Pollen Watch
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with POLLEN_ prefix

use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use shared::{GpsCoordinates, Language};

use crate::external::open_meteo::{DEFAULT_AIR_QUALITY_URL, DEFAULT_FORECAST_URL};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Weather and air-quality provider
    pub provider: ProviderConfig,

    /// Local persisted state
    pub storage: StorageConfig,

    /// Initial location and display language
    pub location: LocationConfig,

    /// Position source
    pub geolocation: GeolocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Forecast endpoint (current conditions + daily forecast)
    pub forecast_url: String,

    /// Air-quality endpoint
    pub air_quality_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per store key
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    /// Preset selected at startup
    pub default_id: String,

    /// Display language code (`ja` or `en`)
    pub language: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeolocationConfig {
    pub timeout_secs: u64,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("POLLEN_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::defaults(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (POLLEN_ prefix)
            .add_source(
                Environment::with_prefix("POLLEN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Builder seeded with every default value
    pub fn defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("provider.forecast_url", DEFAULT_FORECAST_URL)?
            .set_default("provider.air_quality_url", DEFAULT_AIR_QUALITY_URL)?
            .set_default("provider.timeout_secs", 10)?
            .set_default("storage.data_dir", ".pollen-watch")?
            .set_default("location.default_id", "tokyo")?
            .set_default("location.language", "ja")?
            .set_default("geolocation.timeout_secs", 12)
    }

    pub fn language(&self) -> Language {
        Language::from_code(&self.location.language)
    }

    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation.timeout_secs)
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl GeolocationConfig {
    /// Configured position, when both coordinates are present
    pub fn position(&self) -> Option<GpsCoordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GpsCoordinates::new(latitude, longitude)),
            _ => None,
        }
    }
}
