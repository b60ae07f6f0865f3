//! Position acquisition
//!
//! A position request is one-shot and bounded by a timeout; it never
//! retries on its own.

use std::time::Duration;

use async_trait::async_trait;
use shared::validation::{is_in_japan, validate_coordinates};
use shared::GpsCoordinates;
use thiserror::Error;

use crate::config::GeolocationConfig;

pub const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(12);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("position unavailable: {0}")]
    Unavailable(String),

    #[error("invalid position: {0}")]
    InvalidPosition(&'static str),
}

/// Something that can report the device position
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self) -> Result<GpsCoordinates, GeolocationError>;
}

/// Position fixed in configuration
#[derive(Debug, Clone, Default)]
pub struct ConfiguredPosition {
    position: Option<GpsCoordinates>,
}

impl ConfiguredPosition {
    pub fn new(position: Option<GpsCoordinates>) -> Self {
        Self { position }
    }

    pub fn from_config(config: &GeolocationConfig) -> Self {
        Self::new(config.position())
    }

    pub fn is_configured(&self) -> bool {
        self.position.is_some()
    }
}

#[async_trait]
impl PositionSource for ConfiguredPosition {
    async fn current_position(&self) -> Result<GpsCoordinates, GeolocationError> {
        self.position
            .ok_or_else(|| GeolocationError::Unavailable("no position configured".to_string()))
    }
}

/// Request one position from `source`, failing once `timeout` elapses
pub async fn acquire_position(
    source: &dyn PositionSource,
    timeout: Duration,
) -> Result<GpsCoordinates, GeolocationError> {
    let position = tokio::time::timeout(timeout, source.current_position())
        .await
        .map_err(|_| GeolocationError::Timeout(timeout))??;

    validate_coordinates(position.latitude, position.longitude)
        .map_err(GeolocationError::InvalidPosition)?;

    if !is_in_japan(position.latitude, position.longitude) {
        tracing::warn!("Position is outside the calibrated region; seasonal scores may not apply");
    }
    tracing::info!(
        latitude = position.latitude,
        longitude = position.longitude,
        "Position acquired"
    );
    Ok(position)
}
