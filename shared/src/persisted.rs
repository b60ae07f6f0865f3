//! Encoding and decoding of locally persisted state
//!
//! Stored records may come from older builds or be hand-edited, so decoding
//! never fails: anything unreadable falls back to the empty/default state.

use serde_json::Value;

use crate::models::{normalize_history, ActionChecklist, DailyActionKey, SymptomLog, MAX_SEVERITY};

/// Store key for the symptom log history
pub const HISTORY_KEY: &str = "logs";

/// Store key for the action checklist
pub const CHECKLIST_KEY: &str = "checklist";

/// Decode a stored history. Malformed input yields an empty history.
///
/// Individual entries that fail to parse or carry an out-of-range severity
/// are dropped; the rest are re-sorted newest-first, de-duplicated by date
/// and capped.
pub fn decode_history(raw: &str) -> Vec<SymptomLog> {
    let entries = match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let logs = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<SymptomLog>(entry).ok())
        .filter(|log| log.severity <= MAX_SEVERITY)
        .collect();

    normalize_history(logs)
}

/// Encode a history for storage
pub fn encode_history(history: &[SymptomLog]) -> String {
    serde_json::to_string(history).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a stored checklist.
///
/// Unknown keys are ignored; missing or non-boolean values are unchecked.
pub fn decode_checklist(raw: &str) -> ActionChecklist {
    let mut checklist = ActionChecklist::default();

    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
        return checklist;
    };

    for (name, value) in map {
        if let Ok(key) = name.parse::<DailyActionKey>() {
            checklist.set(key, value.as_bool().unwrap_or(false));
        }
    }
    checklist
}

/// Encode a checklist for storage
pub fn encode_checklist(checklist: &ActionChecklist) -> String {
    serde_json::to_string(checklist).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn log(day: u32, severity: u8) -> SymptomLog {
        SymptomLog {
            date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            severity,
            took_medicine: false,
            memo: "note".to_string(),
        }
    }

    #[test]
    fn test_history_round_trip_keeps_order() {
        let history = vec![log(3, 4), log(2, 6), log(1, 2)];
        assert_eq!(decode_history(&encode_history(&history)), history);
    }

    #[test]
    fn test_history_malformed_is_empty() {
        assert!(decode_history("not json").is_empty());
        assert!(decode_history("{\"date\": 1}").is_empty());
        assert!(decode_history("").is_empty());
    }

    #[test]
    fn test_history_drops_bad_entries_and_reorders() {
        let raw = r#"[
            {"date": "2025-04-01", "severity": 2, "took_medicine": false},
            {"date": "2025-04-03", "severity": 42, "took_medicine": true, "memo": ""},
            {"date": "yesterday", "severity": 1, "took_medicine": false, "memo": ""},
            {"date": "2025-04-02", "severity": 5, "took_medicine": true, "memo": "sneezing"},
            {"date": "2025-04-02", "severity": 9, "took_medicine": true, "memo": "dup"}
        ]"#;
        let history = decode_history(raw);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].memo, "sneezing");
        assert_eq!(history[1].memo, "");
    }

    #[test]
    fn test_checklist_decoding() {
        let raw = r#"{"mask": true, "glasses": "yes", "sunscreen": true, "close_windows": true}"#;
        let checklist = decode_checklist(raw);
        assert!(checklist.is_done(DailyActionKey::Mask));
        assert!(!checklist.is_done(DailyActionKey::Glasses));
        assert!(!checklist.is_done(DailyActionKey::IndoorLaundry));
        assert!(checklist.is_done(DailyActionKey::CloseWindows));
        assert_eq!(checklist.iter().count(), 5);
    }

    #[test]
    fn test_checklist_malformed_is_default() {
        assert_eq!(decode_checklist("[true]"), ActionChecklist::default());
        assert_eq!(decode_checklist("{oops"), ActionChecklist::default());
    }

    #[test]
    fn test_checklist_round_trip() {
        let mut checklist = ActionChecklist::default();
        checklist.set(DailyActionKey::WashOnReturn, true);
        let encoded = encode_checklist(&checklist);
        assert!(encoded.contains("\"wash_on_return\":true"));
        assert_eq!(decode_checklist(&encoded), checklist);
    }
}
