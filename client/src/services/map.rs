//! Multi-city map: one independent fetch per city, partial failure tolerated

use chrono::NaiveDate;
use futures::future::join_all;
use serde::Serialize;
use shared::{
    city_risk_point, sort_city_points, CityRiskPoint, MapCity, SnapshotFallback, WeatherSnapshot,
};

use crate::error::{AppError, AppResult, StatusMessage};
use crate::external::WeatherProvider;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOutcome {
    /// Successful cities, highest score first
    pub points: Vec<CityRiskPoint>,
    /// Ids of cities whose fetch failed
    pub failed: Vec<String>,
}

impl MapOutcome {
    pub fn total(&self) -> usize {
        self.points.len() + self.failed.len()
    }

    /// Warning to surface when only some cities loaded
    pub fn partial_warning(&self) -> Option<StatusMessage> {
        if self.failed.is_empty() {
            None
        } else {
            Some(StatusMessage::partial_map(self.failed.len(), self.total()))
        }
    }
}

/// Fetch every city concurrently and wait for all of them to settle.
///
/// Map cities never query air quality; particulates use the map fallback.
/// Fails with [`AppError::MapUnavailable`] only when every city failed.
pub async fn fetch_map(
    provider: &dyn WeatherProvider,
    cities: &[MapCity],
    date: NaiveDate,
) -> AppResult<MapOutcome> {
    let results = join_all(cities.iter().map(|city| async move {
        (city, provider.current_and_forecast(city.coordinates()).await)
    }))
    .await;

    let mut points = Vec::with_capacity(cities.len());
    let mut failed = Vec::new();
    for (city, result) in results {
        match result {
            Ok(conditions) => {
                let snapshot =
                    WeatherSnapshot::from_raw(&conditions.current, &SnapshotFallback::MAP);
                points.push(city_risk_point(city, &snapshot, date));
            }
            Err(e) => {
                tracing::warn!(city = %city.id, "Map city fetch failed: {}", e);
                failed.push(city.id.clone());
            }
        }
    }

    if points.is_empty() && !failed.is_empty() {
        return Err(AppError::MapUnavailable {
            failed: failed.len(),
        });
    }

    sort_city_points(&mut points);
    tracing::info!(
        loaded = points.len(),
        failed = failed.len(),
        "Map fetch finished"
    );
    Ok(MapOutcome { points, failed })
}
