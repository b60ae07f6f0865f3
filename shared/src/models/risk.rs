//! Daily pollen risk scoring
//!
//! Maps a weather/air-quality snapshot and a calendar date into a bounded
//! 0-100 score. The calendar month sets a seasonal base (cedar and cypress
//! dominate February to April) and each weather factor adds a clamped
//! contribution on top of it, so no single reading can swamp the season.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::WeatherSnapshot;
use crate::scalar::{clamp, to_score};
use crate::types::Language;

/// Ordered risk categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// score < 35
    Low,
    /// 35 <= score < 55
    Elevated,
    /// 55 <= score < 75
    High,
    /// score >= 75
    VeryHigh,
}

impl RiskLevel {
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (RiskLevel::Low, Language::English) => "Low",
            (RiskLevel::Elevated, Language::English) => "Moderate",
            (RiskLevel::High, Language::English) => "High",
            (RiskLevel::VeryHigh, Language::English) => "Very high",
            (RiskLevel::Low, Language::Japanese) => "少ない",
            (RiskLevel::Elevated, Language::Japanese) => "やや多い",
            (RiskLevel::High, Language::Japanese) => "多い",
            (RiskLevel::VeryHigh, Language::Japanese) => "非常に多い",
        }
    }

    /// Canned advice for the level
    pub fn advice(&self, language: Language) -> &'static str {
        match (self, language) {
            (RiskLevel::Low, Language::English) => {
                "Pollen is light today. Normal outdoor activity is fine."
            }
            (RiskLevel::Elevated, Language::English) => {
                "Pollen is starting to fly. Consider a mask for longer trips outside."
            }
            (RiskLevel::High, Language::English) => {
                "Pollen is heavy. Wear a mask and glasses, and brush off clothes before going inside."
            }
            (RiskLevel::VeryHigh, Language::English) => {
                "Pollen is extremely heavy. Limit time outdoors, keep windows closed and dry laundry indoors."
            }
            (RiskLevel::Low, Language::Japanese) => {
                "花粉の飛散は少なめです。通常どおり外出して問題ありません。"
            }
            (RiskLevel::Elevated, Language::Japanese) => {
                "花粉が飛び始めています。長時間の外出ではマスクを検討しましょう。"
            }
            (RiskLevel::High, Language::Japanese) => {
                "花粉が多く飛んでいます。マスクとメガネを着用し、帰宅時は衣服の花粉を払いましょう。"
            }
            (RiskLevel::VeryHigh, Language::Japanese) => {
                "花粉が非常に多く飛んでいます。外出を控え、窓を閉めて洗濯物は室内に干しましょう。"
            }
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label(Language::English))
    }
}

/// Derived assessment for one snapshot and date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskResult {
    pub score: u8,
    pub level: RiskLevel,
    pub advice: String,
}

/// Map a score to its level. Lower bounds are inclusive.
pub fn level_for_score(score: u8) -> RiskLevel {
    match score {
        75.. => RiskLevel::VeryHigh,
        55..=74 => RiskLevel::High,
        35..=54 => RiskLevel::Elevated,
        _ => RiskLevel::Low,
    }
}

/// Seasonal base score from the calendar month alone
pub fn seasonal_base(month: u32) -> f64 {
    match month {
        2..=4 => 48.0,
        5 => 36.0,
        6..=9 => 16.0,
        _ => 10.0,
    }
}

/// Weighted weather contributions before the final clamp.
///
/// Exposed so callers can explain a score, and so the penalties can be
/// checked independently of the final rounding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskBreakdown {
    pub seasonal: f64,
    pub temperature: f64,
    pub wind: f64,
    pub dryness: f64,
    pub fine_particulate: f64,
    pub coarse_particulate: f64,
    pub rain_penalty: f64,
    pub humidity_penalty: f64,
}

impl RiskBreakdown {
    pub fn compute(
        month: u32,
        temperature: f64,
        humidity: f64,
        wind: f64,
        precipitation: f64,
        pm10: f64,
        pm25: f64,
    ) -> Self {
        Self {
            seasonal: seasonal_base(month),
            temperature: clamp((temperature - 12.0) * 1.8, -6.0, 22.0),
            wind: clamp((wind - 2.0) * 2.9, 0.0, 20.0),
            dryness: clamp((48.0 - humidity) * 0.6, 0.0, 15.0),
            fine_particulate: clamp((pm25 - 15.0) * 0.4, 0.0, 9.0),
            coarse_particulate: clamp((pm10 - 30.0) * 0.25, 0.0, 8.0),
            rain_penalty: if precipitation > 0.0 { 16.0 } else { 0.0 },
            humidity_penalty: if humidity >= 70.0 { 6.0 } else { 0.0 },
        }
    }

    /// Sum of all terms, unclamped
    pub fn total(&self) -> f64 {
        self.seasonal
            + self.temperature
            + self.wind
            + self.dryness
            + self.fine_particulate
            + self.coarse_particulate
            - self.rain_penalty
            - self.humidity_penalty
    }
}

/// Estimate the pollen risk for a date and a set of readings
pub fn estimate_risk(
    date: NaiveDate,
    temperature: f64,
    humidity: f64,
    wind: f64,
    precipitation: f64,
    pm10: f64,
    pm25: f64,
) -> RiskResult {
    estimate_risk_in(
        Language::default(),
        date,
        temperature,
        humidity,
        wind,
        precipitation,
        pm10,
        pm25,
    )
}

/// [`estimate_risk`] with advice in the given language
#[allow(clippy::too_many_arguments)]
pub fn estimate_risk_in(
    language: Language,
    date: NaiveDate,
    temperature: f64,
    humidity: f64,
    wind: f64,
    precipitation: f64,
    pm10: f64,
    pm25: f64,
) -> RiskResult {
    let breakdown = RiskBreakdown::compute(
        date.month(),
        temperature,
        humidity,
        wind,
        precipitation,
        pm10,
        pm25,
    );
    let score = to_score(breakdown.total());
    let level = level_for_score(score);

    RiskResult {
        score,
        level,
        advice: level.advice(language).to_string(),
    }
}

/// Estimate the risk for a snapshot
pub fn estimate_snapshot_risk(date: NaiveDate, snapshot: &WeatherSnapshot) -> RiskResult {
    estimate_snapshot_risk_in(Language::default(), date, snapshot)
}

/// [`estimate_snapshot_risk`] with advice in the given language
pub fn estimate_snapshot_risk_in(
    language: Language,
    date: NaiveDate,
    snapshot: &WeatherSnapshot,
) -> RiskResult {
    estimate_risk_in(
        language,
        date,
        snapshot.temperature,
        snapshot.humidity,
        snapshot.wind,
        snapshot.precipitation,
        snapshot.pm10,
        snapshot.pm25,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_reference_spring_day() {
        let result = estimate_risk(march(), 20.0, 40.0, 5.0, 0.0, 30.0, 15.0);
        assert_eq!(result.score, 76);
        assert_eq!(result.level, RiskLevel::VeryHigh);
        assert_eq!(result.advice, RiskLevel::VeryHigh.advice(Language::Japanese));
    }

    #[test]
    fn test_reference_spring_day_with_rain() {
        let result = estimate_risk(march(), 20.0, 40.0, 5.0, 2.0, 30.0, 15.0);
        assert_eq!(result.score, 60);
        assert_eq!(result.level, RiskLevel::High);
    }

    #[test]
    fn test_seasonal_base_by_month() {
        assert_eq!(seasonal_base(1), 10.0);
        assert_eq!(seasonal_base(2), 48.0);
        assert_eq!(seasonal_base(4), 48.0);
        assert_eq!(seasonal_base(5), 36.0);
        assert_eq!(seasonal_base(6), 16.0);
        assert_eq!(seasonal_base(9), 16.0);
        assert_eq!(seasonal_base(10), 10.0);
        assert_eq!(seasonal_base(12), 10.0);
    }

    #[test]
    fn test_level_thresholds_inclusive() {
        assert_eq!(level_for_score(0), RiskLevel::Low);
        assert_eq!(level_for_score(34), RiskLevel::Low);
        assert_eq!(level_for_score(35), RiskLevel::Elevated);
        assert_eq!(level_for_score(54), RiskLevel::Elevated);
        assert_eq!(level_for_score(55), RiskLevel::High);
        assert_eq!(level_for_score(74), RiskLevel::High);
        assert_eq!(level_for_score(75), RiskLevel::VeryHigh);
        assert_eq!(level_for_score(100), RiskLevel::VeryHigh);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Elevated);
        assert!(RiskLevel::Elevated < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::VeryHigh);
    }

    #[test]
    fn test_contribution_clamps() {
        let hot = RiskBreakdown::compute(3, 45.0, 0.0, 30.0, 0.0, 500.0, 500.0);
        assert_eq!(hot.temperature, 22.0);
        assert_eq!(hot.wind, 20.0);
        assert_eq!(hot.dryness, 15.0);
        assert_eq!(hot.fine_particulate, 9.0);
        assert_eq!(hot.coarse_particulate, 8.0);

        let cold = RiskBreakdown::compute(3, -15.0, 95.0, 0.0, 0.0, -5.0, -5.0);
        assert_eq!(cold.temperature, -6.0);
        assert_eq!(cold.wind, 0.0);
        assert_eq!(cold.dryness, 0.0);
        assert_eq!(cold.fine_particulate, 0.0);
        assert_eq!(cold.coarse_particulate, 0.0);
        assert_eq!(cold.humidity_penalty, 6.0);
    }

    #[test]
    fn test_humid_rainy_winter_day_floors_at_zero() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let result = estimate_risk(date, -4.0, 90.0, 0.0, 8.0, 0.0, 0.0);
        // 10 - 6 - 16 - 6 is negative
        assert_eq!(result.score, 0);
        assert_eq!(result.level, RiskLevel::Low);
    }

    #[test]
    fn test_humidity_penalty_threshold() {
        let below = RiskBreakdown::compute(3, 12.0, 69.9, 2.0, 0.0, 30.0, 15.0);
        let at = RiskBreakdown::compute(3, 12.0, 70.0, 2.0, 0.0, 30.0, 15.0);
        assert_eq!(below.humidity_penalty, 0.0);
        assert_eq!(at.humidity_penalty, 6.0);
    }

    #[test]
    fn test_snapshot_wrapper_matches_direct_call() {
        let snapshot = WeatherSnapshot {
            temperature: 18.0,
            humidity: 55.0,
            wind: 3.5,
            precipitation: 0.0,
            pm10: 42.0,
            pm25: 21.0,
        };
        let direct = estimate_risk(march(), 18.0, 55.0, 3.5, 0.0, 42.0, 21.0);
        assert_eq!(estimate_snapshot_risk(march(), &snapshot), direct);
    }

    #[test]
    fn test_english_advice() {
        let result = estimate_risk_in(Language::English, march(), 20.0, 40.0, 5.0, 0.0, 30.0, 15.0);
        assert!(result.advice.starts_with("Pollen is extremely heavy"));
    }
}
