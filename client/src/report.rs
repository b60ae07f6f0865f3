//! Plain-text rendering of the dashboard

use std::fmt::Write;

use shared::{DailyActionKey, Language, TrendDirection};

use crate::state::DashboardState;

const TOP_POLLEN_TYPES: usize = 3;

struct Labels {
    risk: &'static str,
    no_data: &'static str,
    pollen: &'static str,
    peak: &'static str,
    forecast: &'static str,
    map: &'static str,
    history: &'static str,
    weekly_average: &'static str,
    trend: &'static str,
    checklist: &'static str,
    raining: &'static str,
}

fn labels(language: Language) -> Labels {
    match language {
        Language::English => Labels {
            risk: "Pollen risk",
            no_data: "No data",
            pollen: "Pollen types",
            peak: "peak",
            forecast: "Forecast",
            map: "Regional map",
            history: "Symptom history",
            weekly_average: "7-day average",
            trend: "Trend",
            checklist: "Today's actions",
            raining: " (raining)",
        },
        Language::Japanese => Labels {
            risk: "花粉リスク",
            no_data: "データなし",
            pollen: "花粉の種類",
            peak: "ピーク",
            forecast: "予報",
            map: "地域マップ",
            history: "症状の記録",
            weekly_average: "7日平均",
            trend: "傾向",
            checklist: "今日の対策",
            raining: "（雨）",
        },
    }
}

fn trend_label(direction: TrendDirection, language: Language) -> &'static str {
    match (direction, language) {
        (TrendDirection::Worsening, Language::English) => "worsening",
        (TrendDirection::Steady, Language::English) => "steady",
        (TrendDirection::Improving, Language::English) => "improving",
        (TrendDirection::Worsening, Language::Japanese) => "悪化",
        (TrendDirection::Steady, Language::Japanese) => "横ばい",
        (TrendDirection::Improving, Language::Japanese) => "改善",
    }
}

/// Render the whole dashboard as text
pub fn render(state: &DashboardState) -> String {
    let language = state.language;
    let l = labels(language);
    let mut out = String::new();

    // writeln! into a String cannot fail
    let _ = writeln!(out, "== {} / {} ({}) ==", l.risk, state.selected.name, state.today);
    match &state.overview {
        Some(overview) => {
            let s = overview.snapshot();
            let _ = writeln!(
                out,
                "{} [{}] {}",
                overview.risk.score,
                overview.risk.level.label(language),
                overview.risk.advice
            );
            let _ = writeln!(
                out,
                "  {:.1}°C  {:.0}%  {:.1} m/s  {:.1} mm{}  PM10 {:.0}  PM2.5 {:.0}",
                s.temperature,
                s.humidity,
                s.wind,
                s.precipitation,
                if s.is_raining() { l.raining } else { "" },
                s.pm10,
                s.pm25
            );

            let _ = writeln!(out, "-- {} --", l.pollen);
            for status in overview.pollen_types.iter().take(TOP_POLLEN_TYPES) {
                let name = match language {
                    Language::English => &status.pollen.name,
                    Language::Japanese => &status.pollen.name_ja,
                };
                let peak = if status.in_peak { l.peak } else { "" };
                let _ = writeln!(
                    out,
                    "  {:<16} {:>3} {} {}",
                    name,
                    status.score,
                    status.level.label(language),
                    peak
                );
            }

            let _ = writeln!(out, "-- {} --", l.forecast);
            for day in &overview.forecast {
                let _ = writeln!(
                    out,
                    "  {} {:>3} {}",
                    day.date,
                    day.score,
                    day.level.label(language)
                );
            }
        }
        None => {
            let _ = writeln!(out, "{}", l.no_data);
        }
    }

    let _ = writeln!(out, "-- {} --", l.map);
    if state.map_points.is_empty() {
        let _ = writeln!(out, "  {}", l.no_data);
    }
    for point in &state.map_points {
        let name = match language {
            Language::English => &point.city.name,
            Language::Japanese => &point.city.name_ja,
        };
        let _ = writeln!(out, "  {:<12} {:>3} {}", name, point.score, point.level.label(language));
    }

    let summary = &state.summary;
    let _ = writeln!(out, "-- {} --", l.history);
    match summary.weekly_average {
        Some(average) => {
            let _ = writeln!(out, "  {}: {:.1}", l.weekly_average, average);
        }
        None => {
            let _ = writeln!(out, "  {}", l.no_data);
        }
    }
    if let (Some(delta), Some(direction)) = (summary.trend, summary.trend_direction) {
        let _ = writeln!(
            out,
            "  {}: {:+.1} ({})",
            l.trend,
            delta,
            trend_label(direction, language)
        );
    }

    let _ = writeln!(
        out,
        "-- {} ({}/{}) --",
        l.checklist,
        state.checklist.completed(),
        DailyActionKey::ALL.len()
    );
    for (key, done) in state.checklist.iter() {
        let mark = if done { "x" } else { " " };
        let _ = writeln!(out, "  [{}] {}", mark, key.label(language));
    }

    for status in [&state.status, &state.map_status].into_iter().flatten() {
        let _ = writeln!(out, "! {}", status.text(language));
    }

    out
}
