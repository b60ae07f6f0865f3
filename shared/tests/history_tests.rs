//! Symptom history tests
//!
//! - Same-date replacement and the 30-entry cap
//! - Weekly average and trend availability
//! - Recovery of persisted state

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use shared::{
    decode_checklist, decode_history, encode_history, severity_trend, upsert_log, weekly_average,
    ActionChecklist, HistorySummary, SymptomLog, MAX_HISTORY,
};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
}

fn entry(offset: i64, severity: u8) -> SymptomLog {
    SymptomLog {
        date: base_date() + Duration::days(offset),
        severity,
        took_medicine: false,
        memo: String::new(),
    }
}

mod log_writes {
    use super::*;

    #[test]
    fn two_logs_same_date_keep_latest() {
        let history = upsert_log(&[], entry(0, 2));
        let history = upsert_log(&history, SymptomLog { memo: "worse".into(), ..entry(0, 7) });
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].severity, 7);
        assert_eq!(history[0].memo, "worse");
    }

    #[test]
    fn thirty_one_dates_keep_thirty_newest() {
        let mut history = Vec::new();
        for offset in 0..31 {
            history = upsert_log(&history, entry(offset, 3));
        }
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.first().map(|l| l.date), Some(base_date() + Duration::days(30)));
        assert!(history.iter().all(|l| l.date != base_date()));
    }

    #[test]
    fn backdated_log_is_placed_by_date() {
        let mut history = Vec::new();
        for offset in [0, 2, 3] {
            history = upsert_log(&history, entry(offset, 1));
        }
        history = upsert_log(&history, entry(1, 9));
        let offsets: Vec<i64> = history
            .iter()
            .map(|l| (l.date - base_date()).num_days())
            .collect();
        assert_eq!(offsets, vec![3, 2, 1, 0]);
    }
}

mod analytics {
    use super::*;

    #[test]
    fn five_logs_have_no_trend() {
        let history: Vec<SymptomLog> = (0..5).rev().map(|o| entry(o, 4)).collect();
        assert_eq!(severity_trend(&history), None);
        assert_eq!(weekly_average(&history), Some(4.0));
    }

    #[test]
    fn six_equal_logs_have_zero_trend() {
        let history: Vec<SymptomLog> = (0..6).rev().map(|o| entry(o, 4)).collect();
        assert_eq!(severity_trend(&history), Some(0.0));
    }

    #[test]
    fn summary_reflects_history() {
        let severities = [9u8, 8, 7, 3, 3, 3, 2, 1];
        let history: Vec<SymptomLog> = severities
            .iter()
            .enumerate()
            .map(|(i, &s)| entry(10 - i as i64, s))
            .collect();
        let summary = HistorySummary::from_logs(&history);
        assert_eq!(summary.entries, 8);
        // (9 + 8 + 7 + 3 + 3 + 3 + 2) / 7 = 5
        assert_eq!(summary.weekly_average, Some(5.0));
        assert_eq!(summary.trend, Some(5.0));
    }
}

mod persisted_state {
    use super::*;

    #[test]
    fn corrupt_records_fall_back_to_defaults() {
        assert!(decode_history("{{{{").is_empty());
        assert_eq!(decode_checklist("null"), ActionChecklist::default());
    }

    #[test]
    fn stored_history_is_capped_on_load() {
        let history: Vec<SymptomLog> = (0..40).rev().map(|o| entry(o, 2)).collect();
        let loaded = decode_history(&encode_history(&history));
        assert_eq!(loaded.len(), MAX_HISTORY);
        assert_eq!(loaded[0].date, base_date() + Duration::days(39));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Upserts never exceed the cap, never duplicate a date and stay sorted
    #[test]
    fn prop_upsert_invariants(
        writes in proptest::collection::vec((0i64..60, 0u8..=10), 0..80)
    ) {
        let mut history = Vec::new();
        for (offset, severity) in writes {
            history = upsert_log(&history, entry(offset, severity));
        }
        prop_assert!(history.len() <= MAX_HISTORY);
        prop_assert!(history.windows(2).all(|w| w[0].date > w[1].date));
    }

    /// Weekly average is within the severity scale whenever defined
    #[test]
    fn prop_weekly_average_in_range(
        severities in proptest::collection::vec(0u8..=10, 0..20)
    ) {
        let history: Vec<SymptomLog> = severities
            .iter()
            .enumerate()
            .map(|(i, &s)| entry(100 - i as i64, s))
            .collect();
        match weekly_average(&history) {
            None => prop_assert!(history.is_empty()),
            Some(avg) => prop_assert!((0.0..=10.0).contains(&avg)),
        }
        prop_assert_eq!(severity_trend(&history).is_some(), history.len() >= 6);
    }
}
