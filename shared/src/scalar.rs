//! Scalar helpers used by every scoring component

use serde_json::Value;

/// Clamp `value` into `[min, max]`
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Round to one decimal place, halves away from zero
pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Clamp into `[0, 100]` and round to the nearest integer score
pub fn to_score(value: f64) -> u8 {
    clamp(value, 0.0, 100.0).round() as u8
}

/// Coerce a raw JSON value into a finite number.
///
/// Numbers and numeric strings are accepted. Null, booleans, containers,
/// unparsable strings and non-finite results all yield `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Coerce an optional raw value, substituting `fallback` when it is missing
/// or not a finite number
pub fn number_or(value: Option<&Value>, fallback: f64) -> f64 {
    value.and_then(coerce_number).unwrap_or(fallback)
}

/// Replace a non-finite float with `fallback`
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Circular distance between two calendar months (1-12).
///
/// December and January are one month apart.
pub fn month_distance(a: u32, b: u32) -> u32 {
    let diff = a.abs_diff(b) % 12;
    diff.min(12 - diff)
}
