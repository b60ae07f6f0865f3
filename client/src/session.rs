//! Runs dashboard effects against the provider, store and position source

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use shared::validation::validate_suitability;
use shared::{map_cities, MapCity};

use crate::calendar::Clock;
use crate::external::geolocation::DEFAULT_GEOLOCATION_TIMEOUT;
use crate::external::{acquire_position, PositionSource, WeatherProvider};
use crate::services::{fetch_location_weather, fetch_map};
use crate::state::{Action, DashboardState, Effect};
use crate::store::{save_checklist, save_history, KeyValueStore};

/// Owns the dashboard state and its collaborators
pub struct Session {
    state: DashboardState,
    provider: Arc<dyn WeatherProvider>,
    store: Arc<dyn KeyValueStore>,
    positions: Arc<dyn PositionSource>,
    cities: Vec<MapCity>,
    geolocation_timeout: Duration,
}

impl Session {
    pub fn new(
        state: DashboardState,
        provider: Arc<dyn WeatherProvider>,
        store: Arc<dyn KeyValueStore>,
        positions: Arc<dyn PositionSource>,
    ) -> Self {
        Self {
            state,
            provider,
            store,
            positions,
            cities: map_cities(),
            geolocation_timeout: DEFAULT_GEOLOCATION_TIMEOUT,
        }
    }

    /// Replace the map cities. Cities with an out-of-range suitability are
    /// skipped.
    pub fn with_cities(mut self, cities: Vec<MapCity>) -> Self {
        self.cities = cities
            .into_iter()
            .filter(|city| match validate_suitability(city.suitability) {
                Ok(()) => true,
                Err(reason) => {
                    tracing::warn!(city = %city.id, "Skipping map city: {}", reason);
                    false
                }
            })
            .collect();
        self
    }

    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Apply `action` and run the resulting effects until none remain.
    ///
    /// Effects produced by one transition run concurrently; their
    /// completions are applied in the order the effects were issued.
    pub async fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);

        while let Some(action) = queue.pop_front() {
            let effects = self.state.apply(action);
            if effects.is_empty() {
                continue;
            }
            let completions = join_all(effects.into_iter().map(|effect| self.run(effect))).await;
            queue.extend(completions.into_iter().flatten());
        }
    }

    /// Request the device position and select it on success
    pub async fn locate(&mut self) {
        let result = acquire_position(self.positions.as_ref(), self.geolocation_timeout).await;
        self.dispatch(Action::PositionResolved(result)).await;
    }

    /// Roll the dashboard over when the reference-zone date has moved on
    pub async fn sync_day(&mut self, clock: &dyn Clock) {
        let today = clock.today();
        if today != self.state.today {
            tracing::info!(%today, "Reference date changed");
            self.dispatch(Action::DayChanged(today)).await;
        }
    }

    async fn run(&self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::FetchPrimary { id, location } => {
                tracing::info!(location = %location.id, "Fetching primary weather");
                let result =
                    fetch_location_weather(self.provider.as_ref(), location.coordinates).await;
                Some(Action::PrimaryLoaded {
                    id,
                    location,
                    result,
                })
            }
            Effect::FetchMap { id, date } => {
                tracing::info!(cities = self.cities.len(), "Fetching map cities");
                let result = fetch_map(self.provider.as_ref(), &self.cities, date).await;
                Some(Action::MapLoaded { id, result })
            }
            Effect::PersistLogs(history) => save_history(self.store.as_ref(), &history)
                .err()
                .map(Action::PersistenceFailed),
            Effect::PersistChecklist(checklist) => save_checklist(self.store.as_ref(), &checklist)
                .err()
                .map(Action::PersistenceFailed),
        }
    }
}
