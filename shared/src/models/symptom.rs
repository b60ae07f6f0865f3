//! Symptom log models and history analytics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::scalar::round_to_one_decimal;

/// Maximum number of logs kept, newest first
pub const MAX_HISTORY: usize = 30;

/// Entries averaged for the weekly figure
pub const WEEKLY_WINDOW: usize = 7;

/// Size of each window compared by the trend
pub const TREND_WINDOW: usize = 3;

/// Highest severity on the self-report scale
pub const MAX_SEVERITY: u8 = 10;

/// One day's self-report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomLog {
    /// Unique per history
    pub date: NaiveDate,
    /// 0 (none) to 10 (worst)
    pub severity: u8,
    pub took_medicine: bool,
    #[serde(default)]
    pub memo: String,
}

/// A symptom report as submitted by the user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SymptomLogInput {
    #[validate(range(max = 10, message = "Severity must be between 0 and 10"))]
    pub severity: u8,
    pub took_medicine: bool,
    #[validate(length(max = 200, message = "Memo must be at most 200 characters"))]
    pub memo: String,
}

impl SymptomLogInput {
    /// Attach the calendar date the report belongs to
    pub fn into_log(self, date: NaiveDate) -> SymptomLog {
        SymptomLog {
            date,
            severity: self.severity,
            took_medicine: self.took_medicine,
            memo: self.memo.trim().to_string(),
        }
    }
}

/// Direction of a severity trend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Worsening,
    Steady,
    Improving,
}

impl TrendDirection {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            TrendDirection::Worsening
        } else if delta < 0.0 {
            TrendDirection::Improving
        } else {
            TrendDirection::Steady
        }
    }
}

fn mean_severity(logs: &[SymptomLog]) -> f64 {
    let total: u32 = logs.iter().map(|log| u32::from(log.severity)).sum();
    f64::from(total) / logs.len() as f64
}

/// Mean severity of the newest seven entries, to one decimal
pub fn weekly_average(history: &[SymptomLog]) -> Option<f64> {
    if history.is_empty() {
        return None;
    }
    let window = &history[..history.len().min(WEEKLY_WINDOW)];
    Some(round_to_one_decimal(mean_severity(window)))
}

/// Mean of the newest three entries minus the mean of the three before.
///
/// `None` until six entries exist. Positive means worsening.
pub fn severity_trend(history: &[SymptomLog]) -> Option<f64> {
    if history.len() < TREND_WINDOW * 2 {
        return None;
    }
    let recent = mean_severity(&history[..TREND_WINDOW]);
    let previous = mean_severity(&history[TREND_WINDOW..TREND_WINDOW * 2]);
    Some(round_to_one_decimal(recent - previous))
}

/// Insert `log`, replacing any entry for the same date.
///
/// The result is newest-first by date and capped at [`MAX_HISTORY`].
pub fn upsert_log(history: &[SymptomLog], log: SymptomLog) -> Vec<SymptomLog> {
    let date = log.date;
    let mut next: Vec<SymptomLog> = Vec::with_capacity(history.len() + 1);
    next.push(log);
    next.extend(history.iter().filter(|existing| existing.date != date).cloned());
    normalize_history(next)
}

/// Sort newest-first, keep the first entry seen for each date and truncate
pub fn normalize_history(mut logs: Vec<SymptomLog>) -> Vec<SymptomLog> {
    logs.sort_by(|a, b| b.date.cmp(&a.date));
    logs.dedup_by(|later, earlier| later.date == earlier.date);
    logs.truncate(MAX_HISTORY);
    logs
}

/// Derived figures for the history panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySummary {
    pub entries: usize,
    pub weekly_average: Option<f64>,
    pub trend: Option<f64>,
    pub trend_direction: Option<TrendDirection>,
    /// Days among the newest seven entries with medicine taken
    pub medicine_days: usize,
    pub latest: Option<SymptomLog>,
}

impl HistorySummary {
    pub fn from_logs(history: &[SymptomLog]) -> Self {
        let trend = severity_trend(history);
        Self {
            entries: history.len(),
            weekly_average: weekly_average(history),
            trend,
            trend_direction: trend.map(TrendDirection::from_delta),
            medicine_days: history
                .iter()
                .take(WEEKLY_WINDOW)
                .filter(|log| log.took_medicine)
                .count(),
            latest: history.first().cloned(),
        }
    }
}
