//! Validation utilities for Pollen Watch
//!
//! Range checks for values that come from users or configuration rather
//! than from the weather provider. Provider readings are never rejected;
//! they are coerced with fallbacks instead (see [`crate::models::WeatherSnapshot`]).

use crate::models::MAX_SEVERITY;

/// Validate latitude/longitude are within WGS84 bounds and finite
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err("Coordinates must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a calendar month number
pub fn validate_month(month: u32) -> Result<(), &'static str> {
    if !(1..=12).contains(&month) {
        return Err("Month must be between 1 and 12");
    }
    Ok(())
}

/// Validate a self-reported severity
pub fn validate_severity(severity: i64) -> Result<u8, &'static str> {
    if severity < 0 || severity > i64::from(MAX_SEVERITY) {
        return Err("Severity must be between 0 and 10");
    }
    Ok(severity as u8)
}

/// Validate a suitability coefficient
pub fn validate_suitability(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err("Suitability must be between 0 and 1");
    }
    Ok(())
}

/// Roughly the Japanese archipelago, used to flag positions outside the
/// region the seasonal calibration targets
pub fn is_in_japan(latitude: f64, longitude: f64) -> bool {
    (24.0..=46.0).contains(&latitude) && (122.0..=146.0).contains(&longitude)
}
