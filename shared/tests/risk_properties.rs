//! Scoring engine property tests
//!
//! - Score bounds and level consistency
//! - Wind monotonicity and the fixed rain penalty
//! - Seasonal ramp of pollen taxa
//! - Map aggregation bounds

use chrono::NaiveDate;
use proptest::prelude::*;
use shared::{
    adjust_map_risk_score, estimate_risk, estimate_type_score, level_for_score, pollen_catalog,
    seasonal_factor, PollenType, RiskBreakdown, RiskLevel, WeatherSnapshot,
};

fn date_in(month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, 15).unwrap()
}

fn month_strategy() -> impl Strategy<Value = u32> {
    1u32..=12
}

fn temperature_strategy() -> impl Strategy<Value = f64> {
    -20.0f64..40.0
}

fn humidity_strategy() -> impl Strategy<Value = f64> {
    0.0f64..=100.0
}

fn wind_strategy() -> impl Strategy<Value = f64> {
    0.0f64..25.0
}

fn particulate_strategy() -> impl Strategy<Value = f64> {
    -5.0f64..200.0
}

fn snapshot_strategy() -> impl Strategy<Value = WeatherSnapshot> {
    (
        temperature_strategy(),
        humidity_strategy(),
        wind_strategy(),
        0.0f64..20.0,
        particulate_strategy(),
        particulate_strategy(),
    )
        .prop_map(|(temperature, humidity, wind, precipitation, pm10, pm25)| WeatherSnapshot {
            temperature,
            humidity,
            wind,
            precipitation,
            pm10,
            pm25,
        })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn spring_reference_day_is_very_high() {
        let result = estimate_risk(date_in(3), 20.0, 40.0, 5.0, 0.0, 30.0, 15.0);
        assert_eq!(result.score, 76);
        assert_eq!(result.level, RiskLevel::VeryHigh);
    }

    #[test]
    fn rain_drops_reference_day_to_high() {
        let result = estimate_risk(date_in(3), 20.0, 40.0, 5.0, 2.0, 30.0, 15.0);
        assert_eq!(result.score, 60);
        assert_eq!(result.level, RiskLevel::High);
    }

    #[test]
    fn extreme_inputs_do_not_panic() {
        let result = estimate_risk(date_in(1), -40.0, 0.0, 0.0, 0.0, -10.0, -10.0);
        assert!(result.score <= 100);
        let result = estimate_risk(date_in(3), 60.0, 0.0, 80.0, 0.0, 900.0, 900.0);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn cedar_ramp_across_year_boundary() {
        let cedar = pollen_catalog()
            .into_iter()
            .find(|p| p.id == "cedar")
            .unwrap();
        assert_eq!(seasonal_factor(&cedar, 3), 1.0);
        assert_eq!(seasonal_factor(&cedar, 1), 0.44);
        assert_eq!(seasonal_factor(&cedar, 5), 0.44);
        assert_eq!(seasonal_factor(&cedar, 12), 0.2);
        assert_eq!(seasonal_factor(&cedar, 6), 0.2);
        assert_eq!(seasonal_factor(&cedar, 8), 0.0);
    }

    #[test]
    fn zero_suitability_stays_near_baseline() {
        for month in 2..=4 {
            assert_eq!(adjust_map_risk_score(14, 0.0, month), 14);
            assert_ne!(adjust_map_risk_score(90, 0.0, month), 14);
            assert_ne!(adjust_map_risk_score(0, 0.0, month), 14);
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Score stays in [0, 100] and its level follows the thresholds
        #[test]
        fn prop_score_bounded_and_level_consistent(
            month in month_strategy(),
            snapshot in snapshot_strategy()
        ) {
            let result = estimate_risk(
                date_in(month),
                snapshot.temperature,
                snapshot.humidity,
                snapshot.wind,
                snapshot.precipitation,
                snapshot.pm10,
                snapshot.pm25,
            );
            prop_assert!(result.score <= 100);
            let expected = match result.score {
                75.. => RiskLevel::VeryHigh,
                55..=74 => RiskLevel::High,
                35..=54 => RiskLevel::Elevated,
                _ => RiskLevel::Low,
            };
            prop_assert_eq!(result.level, expected);
            prop_assert_eq!(level_for_score(result.score), expected);
        }

        /// Identical inputs always give identical output
        #[test]
        fn prop_estimate_is_deterministic(
            month in month_strategy(),
            snapshot in snapshot_strategy()
        ) {
            let run = || estimate_risk(
                date_in(month),
                snapshot.temperature,
                snapshot.humidity,
                snapshot.wind,
                snapshot.precipitation,
                snapshot.pm10,
                snapshot.pm25,
            );
            prop_assert_eq!(run(), run());
        }

        /// More wind never lowers the score
        #[test]
        fn prop_wind_is_monotonic(
            month in month_strategy(),
            snapshot in snapshot_strategy(),
            extra in 0.0f64..10.0
        ) {
            let calm = estimate_risk(
                date_in(month),
                snapshot.temperature,
                snapshot.humidity,
                snapshot.wind,
                snapshot.precipitation,
                snapshot.pm10,
                snapshot.pm25,
            );
            let windy = estimate_risk(
                date_in(month),
                snapshot.temperature,
                snapshot.humidity,
                snapshot.wind + extra,
                snapshot.precipitation,
                snapshot.pm10,
                snapshot.pm25,
            );
            prop_assert!(windy.score >= calm.score);
        }

        /// Any positive precipitation subtracts exactly 16 before clamping
        #[test]
        fn prop_rain_penalty_is_sixteen(
            month in month_strategy(),
            temperature in temperature_strategy(),
            humidity in humidity_strategy(),
            wind in wind_strategy(),
            precipitation in 0.01f64..50.0
        ) {
            let dry = RiskBreakdown::compute(month, temperature, humidity, wind, 0.0, 30.0, 15.0);
            let wet = RiskBreakdown::compute(
                month,
                temperature,
                humidity,
                wind,
                precipitation,
                30.0,
                15.0,
            );
            prop_assert!((dry.total() - wet.total() - 16.0).abs() < 1e-9);
        }

        /// Per-taxon scores stay in [0, 100] with or without weather
        #[test]
        fn prop_type_score_bounded(
            month in month_strategy(),
            snapshot in proptest::option::of(snapshot_strategy()),
            overall in 0u8..=100
        ) {
            for pollen in pollen_catalog() {
                let score = estimate_type_score(&pollen, month, snapshot.as_ref(), overall);
                prop_assert!(score <= 100);
            }
        }

        /// The seasonal factor only ever takes one of four values
        #[test]
        fn prop_seasonal_factor_levels(
            month in month_strategy(),
            season in proptest::collection::btree_set(1u32..=12, 0..6)
        ) {
            let pollen = PollenType {
                id: "p".to_string(),
                name: "P".to_string(),
                name_ja: "P".to_string(),
                season_months: season.iter().copied().collect(),
                peak_months: Vec::new(),
                description: String::new(),
            };
            let factor = seasonal_factor(&pollen, month);
            prop_assert!([0.0, 0.2, 0.44, 1.0].contains(&factor));
            prop_assert_eq!(factor == 1.0, season.contains(&month));
        }

        /// Map adjustment stays in [0, 100] for any suitability
        #[test]
        fn prop_map_adjustment_bounded(
            raw in 0u8..=100,
            suitability in -1.0f64..3.0,
            month in month_strategy()
        ) {
            prop_assert!(adjust_map_risk_score(raw, suitability, month) <= 100);
        }

        /// The adjusted score lies between the raw score and the baseline
        #[test]
        fn prop_map_adjustment_between_raw_and_baseline(
            raw in 0u8..=100,
            suitability in 0.0f64..=1.0,
            month in month_strategy()
        ) {
            let adjusted = adjust_map_risk_score(raw, suitability, month);
            let low = raw.min(14);
            let high = raw.max(14);
            prop_assert!(adjusted >= low && adjusted <= high);
        }
    }
}
