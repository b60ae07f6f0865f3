//! WebAssembly module for Pollen Watch
//!
//! Provides client-side computation for:
//! - Daily risk scoring and three-day forecast
//! - Per-taxon pollen breakdown
//! - Map score adjustment
//! - Symptom history writes and trend figures
//!
//! Structured values cross the boundary as JSON strings.

use chrono::{Datelike, NaiveDate};
use validator::Validate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::persisted::{decode_checklist, decode_history, encode_checklist, encode_history};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

fn js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", date, e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to serialize result: {}", e))
}

fn risk_json(
    date: &str,
    language: &str,
    snapshot: WeatherSnapshot,
) -> Result<String, String> {
    let date = parse_date(date)?;
    let snapshot = snapshot.sanitized(&SnapshotFallback::PRIMARY);
    to_json(&estimate_snapshot_risk_in(Language::from_code(language), date, &snapshot))
}

fn pollen_types_json(
    month: u32,
    snapshot_json: Option<&str>,
    overall_score: u8,
) -> Result<String, String> {
    validate_month(month).map_err(str::to_string)?;
    let snapshot = snapshot_json
        .map(|raw| {
            serde_json::from_str::<WeatherSnapshot>(raw)
                .map(|s| s.sanitized(&SnapshotFallback::PRIMARY))
                .map_err(|e| format!("Invalid snapshot JSON: {}", e))
        })
        .transpose()?;
    to_json(&rank_pollen_types(
        &pollen_catalog(),
        month,
        snapshot.as_ref(),
        overall_score.min(100),
    ))
}

fn forecast_json(days_json: &str, current_json: &str) -> Result<String, String> {
    let days: Vec<DailyConditions> =
        serde_json::from_str(days_json).map_err(|e| format!("Invalid forecast JSON: {}", e))?;
    let current: WeatherSnapshot = serde_json::from_str(current_json)
        .map_err(|e| format!("Invalid snapshot JSON: {}", e))?;
    to_json(&build_forecast(&days, &current.sanitized(&SnapshotFallback::PRIMARY)))
}

fn submit_log_json(
    history_json: &str,
    date: &str,
    severity: i64,
    took_medicine: bool,
    memo: &str,
) -> Result<String, String> {
    let severity = validate_severity(severity).map_err(str::to_string)?;
    let input = SymptomLogInput {
        severity,
        took_medicine,
        memo: memo.to_string(),
    };
    input
        .validate()
        .map_err(|e| format!("Invalid symptom log: {}", e))?;
    let log = input.into_log(parse_date(date)?);
    Ok(encode_history(&upsert_log(&decode_history(history_json), log)))
}

/// Score a day's readings. Returns a `RiskResult` as JSON.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn estimate_risk_score(
    date: &str,
    language: &str,
    temperature: f64,
    humidity: f64,
    wind: f64,
    precipitation: f64,
    pm10: f64,
    pm25: f64,
) -> Result<String, JsValue> {
    let snapshot = WeatherSnapshot {
        temperature,
        humidity,
        wind,
        precipitation,
        pm10,
        pm25,
    };
    risk_json(date, language, snapshot).map_err(js_error)
}

/// Level name (`low`, `elevated`, `high`, `very_high`) for a score
#[wasm_bindgen]
pub fn risk_level_for_score(score: u8) -> String {
    // Same spelling as the serialized `RiskResult.level`
    match serde_json::to_value(level_for_score(score)) {
        Ok(serde_json::Value::String(name)) => name,
        _ => String::new(),
    }
}

/// Rank the default pollen catalog. `snapshot_json` may be omitted when no
/// weather is available yet.
#[wasm_bindgen]
pub fn estimate_pollen_types(
    month: u32,
    snapshot_json: Option<String>,
    overall_score: u8,
) -> Result<String, JsValue> {
    pollen_types_json(month, snapshot_json.as_deref(), overall_score).map_err(js_error)
}

/// Score a forecast from daily conditions and the current snapshot
#[wasm_bindgen]
pub fn estimate_forecast(days_json: &str, current_json: &str) -> Result<String, JsValue> {
    forecast_json(days_json, current_json).map_err(js_error)
}

/// Blend a raw score toward the map baseline
#[wasm_bindgen]
pub fn adjust_map_score(raw_score: u8, suitability: f64, month: u32) -> u8 {
    let suitability = if suitability.is_finite() { suitability } else { 0.0 };
    adjust_map_risk_score(raw_score.min(100), suitability, month)
}

/// Month (1-12) of an ISO date, for callers that only hold a date string
#[wasm_bindgen]
pub fn month_of(date: &str) -> Result<u32, JsValue> {
    parse_date(date).map(|d| d.month()).map_err(js_error)
}

/// Add or replace the log for `date` and return the new stored history
#[wasm_bindgen]
pub fn submit_symptom_log(
    history_json: &str,
    date: &str,
    severity: i32,
    took_medicine: bool,
    memo: &str,
) -> Result<String, JsValue> {
    submit_log_json(history_json, date, i64::from(severity), took_medicine, memo).map_err(js_error)
}

/// Weekly severity average, `undefined` for an empty history
#[wasm_bindgen]
pub fn weekly_severity_average(history_json: &str) -> Option<f64> {
    weekly_average(&decode_history(history_json))
}

/// Severity trend, `undefined` until six logs exist
#[wasm_bindgen]
pub fn severity_trend_delta(history_json: &str) -> Option<f64> {
    severity_trend(&decode_history(history_json))
}

/// Normalize a stored checklist so all five keys are present
#[wasm_bindgen]
pub fn normalize_checklist(raw: &str) -> String {
    encode_checklist(&decode_checklist(raw))
}
