//! Primary location risk: fetch one snapshot and derive the overview

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shared::{
    build_forecast, estimate_snapshot_risk_in, pollen_catalog, rank_pollen_types,
    DailyConditions, ForecastDay, GpsCoordinates, Language, Location, PollenTypeStatus,
    RawReadings, RiskResult, SnapshotFallback, WeatherSnapshot,
};

use crate::error::AppResult;
use crate::external::WeatherProvider;

/// Coerced readings for the primary location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationWeather {
    pub snapshot: WeatherSnapshot,
    pub daily: Vec<DailyConditions>,
}

/// Fetch weather and air quality together. Both must succeed; the first
/// failure fails the whole refresh.
pub async fn fetch_location_weather(
    provider: &dyn WeatherProvider,
    position: GpsCoordinates,
) -> AppResult<LocationWeather> {
    let (conditions, air) = tokio::try_join!(
        provider.current_and_forecast(position),
        provider.air_quality(position)
    )?;

    let raw = RawReadings {
        pm10: air.pm10,
        pm25: air.pm25,
        ..conditions.current
    };

    Ok(LocationWeather {
        snapshot: WeatherSnapshot::from_raw(&raw, &SnapshotFallback::PRIMARY),
        daily: conditions.daily,
    })
}

/// Today's assessment of the selected location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskOverview {
    pub location: Location,
    pub date: NaiveDate,
    pub weather: LocationWeather,
    pub risk: RiskResult,
    pub pollen_types: Vec<PollenTypeStatus>,
    pub forecast: Vec<ForecastDay>,
}

impl RiskOverview {
    pub fn assess(
        location: Location,
        weather: LocationWeather,
        date: NaiveDate,
        language: Language,
    ) -> Self {
        let risk = estimate_snapshot_risk_in(language, date, &weather.snapshot);
        let pollen_types = rank_pollen_types(
            &pollen_catalog(),
            date.month(),
            Some(&weather.snapshot),
            risk.score,
        );
        let forecast = build_forecast(&weather.daily, &weather.snapshot);

        Self {
            location,
            date,
            weather,
            risk,
            pollen_types,
            forecast,
        }
    }

    /// Same assessment with advice in another language
    pub fn translated(self, language: Language) -> Self {
        Self::assess(self.location, self.weather, self.date, language)
    }

    pub fn snapshot(&self) -> &WeatherSnapshot {
        &self.weather.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RiskLevel;

    fn spring_weather() -> LocationWeather {
        LocationWeather {
            snapshot: WeatherSnapshot {
                temperature: 20.0,
                humidity: 40.0,
                wind: 5.0,
                precipitation: 0.0,
                pm10: 30.0,
                pm25: 15.0,
            },
            daily: vec![DailyConditions {
                date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                temperature_max: Some(20.0),
                wind_max: Some(5.0),
                precipitation_probability: Some(70.0),
            }],
        }
    }

    #[test]
    fn test_assess_reference_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let location = Location::new("tokyo", "東京", 35.6895, 139.6917);
        let overview = RiskOverview::assess(location, spring_weather(), date, Language::English);

        assert_eq!(overview.risk.score, 76);
        assert_eq!(overview.risk.level, RiskLevel::VeryHigh);
        assert_eq!(overview.pollen_types[0].pollen.id, "cedar");
        // 70% precipitation probability counts as a rainy day
        assert_eq!(overview.forecast[0].score, 60);
    }

    #[test]
    fn test_translated_keeps_score() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let location = Location::new("tokyo", "東京", 35.6895, 139.6917);
        let english = RiskOverview::assess(location, spring_weather(), date, Language::English);
        let japanese = english.clone().translated(Language::Japanese);

        assert_eq!(english.risk.score, japanese.risk.score);
        assert_ne!(english.risk.advice, japanese.risk.advice);
    }
}
