//! Dashboard view state and its transitions
//!
//! [`DashboardState::apply`] is the only way the state changes. It never
//! performs I/O; everything that must happen outside (fetches, writes) is
//! returned as an [`Effect`] for the session to run.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::{
    preset_locations, upsert_log, ActionChecklist, CityRiskPoint, DailyActionKey, GpsCoordinates,
    HistorySummary, Language, Location, SymptomLog, SymptomLogInput, CURRENT_POSITION_ID,
};
use validator::Validate;

use crate::error::{AppError, AppResult, StatusMessage};
use crate::external::GeolocationError;
use crate::services::{LocationWeather, MapOutcome, RiskOverview};
use crate::store::PersistedState;

/// Independent fetch streams. Each has its own request counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestSlot {
    Primary,
    Map,
}

/// Monotonically increasing per slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Clone, Copy, Default)]
struct SlotRequests {
    latest: u64,
    pending: bool,
}

/// Tracks the newest request issued per slot so late completions of
/// superseded requests can be discarded
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    slots: HashMap<RequestSlot, SlotRequests>,
}

impl RequestTracker {
    pub fn issue(&mut self, slot: RequestSlot) -> RequestId {
        let entry = self.slots.entry(slot).or_default();
        entry.latest += 1;
        entry.pending = true;
        RequestId(entry.latest)
    }

    /// Accept a completion. Returns `false` when `id` has been superseded.
    pub fn complete(&mut self, slot: RequestSlot, id: RequestId) -> bool {
        match self.slots.get_mut(&slot) {
            Some(entry) if entry.latest == id.0 => {
                entry.pending = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self, slot: RequestSlot) -> bool {
        self.slots.get(&slot).map(|s| s.pending).unwrap_or(false)
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone)]
pub enum Action {
    SelectLocation(String),
    RefreshPrimary,
    RefreshMap,
    RefreshAll,
    PrimaryLoaded {
        id: RequestId,
        location: Location,
        result: AppResult<LocationWeather>,
    },
    MapLoaded {
        id: RequestId,
        result: AppResult<MapOutcome>,
    },
    PositionResolved(Result<GpsCoordinates, GeolocationError>),
    SubmitLog(SymptomLogInput),
    ToggleAction(DailyActionKey),
    DayChanged(NaiveDate),
    SetLanguage(Language),
    PersistenceFailed(AppError),
    DismissStatus,
}

/// Work requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchPrimary { id: RequestId, location: Location },
    FetchMap { id: RequestId, date: NaiveDate },
    PersistLogs(Vec<SymptomLog>),
    PersistChecklist(ActionChecklist),
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub language: Language,
    /// Reference-zone date used for scoring and log de-duplication
    pub today: NaiveDate,
    pub locations: Vec<Location>,
    pub selected: Location,
    pub overview: Option<RiskOverview>,
    pub map_points: Vec<CityRiskPoint>,
    pub history: Vec<SymptomLog>,
    pub summary: HistorySummary,
    pub checklist: ActionChecklist,
    /// Latest message for the primary view, geolocation and local storage
    pub status: Option<StatusMessage>,
    /// Map refresh outcome, kept apart so it never hides `status`
    pub map_status: Option<StatusMessage>,
    requests: RequestTracker,
}

impl DashboardState {
    /// Initial state from persisted data. `default_location` must name a
    /// preset.
    pub fn new(
        today: NaiveDate,
        language: Language,
        default_location: &str,
        persisted: PersistedState,
    ) -> AppResult<Self> {
        let locations = preset_locations();
        let selected = locations
            .iter()
            .find(|l| l.id == default_location)
            .cloned()
            .ok_or_else(|| AppError::UnknownLocation(default_location.to_string()))?;

        Ok(Self {
            language,
            today,
            locations,
            selected,
            overview: None,
            map_points: Vec::new(),
            summary: HistorySummary::from_logs(&persisted.history),
            history: persisted.history,
            checklist: persisted.checklist,
            status: None,
            map_status: None,
            requests: RequestTracker::default(),
        })
    }

    pub fn is_loading(&self, slot: RequestSlot) -> bool {
        self.requests.is_pending(slot)
    }

    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::SelectLocation(id) => {
                let Some(location) = self.locations.iter().find(|l| l.id == id).cloned() else {
                    self.status = Some(AppError::UnknownLocation(id).status_message());
                    return Vec::new();
                };
                self.selected = location;
                self.overview = None;
                vec![self.fetch_primary()]
            }
            Action::RefreshPrimary => vec![self.fetch_primary()],
            Action::RefreshMap => vec![self.fetch_map()],
            Action::RefreshAll => vec![self.fetch_primary(), self.fetch_map()],
            Action::PrimaryLoaded {
                id,
                location,
                result,
            } => {
                if !self.requests.complete(RequestSlot::Primary, id) {
                    tracing::debug!(
                        ?id,
                        location = %location.id,
                        "Discarding stale primary response"
                    );
                    return Vec::new();
                }
                match result {
                    Ok(weather) => {
                        self.overview = Some(RiskOverview::assess(
                            location,
                            weather,
                            self.today,
                            self.language,
                        ));
                        self.clear_status("PROVIDER_ERROR");
                    }
                    Err(e) => {
                        tracing::warn!(location = %location.id, "Primary refresh failed: {}", e);
                        self.overview = None;
                        self.status = Some(e.status_message());
                    }
                }
                Vec::new()
            }
            Action::MapLoaded { id, result } => {
                if !self.requests.complete(RequestSlot::Map, id) {
                    tracing::debug!(?id, "Discarding stale map response");
                    return Vec::new();
                }
                match result {
                    Ok(outcome) => {
                        self.map_status = outcome.partial_warning();
                        self.map_points = outcome.points;
                    }
                    Err(e) => {
                        tracing::warn!("Map refresh failed: {}", e);
                        self.map_points.clear();
                        self.map_status = Some(e.status_message());
                    }
                }
                Vec::new()
            }
            Action::PositionResolved(Ok(position)) => {
                let label = match self.language {
                    Language::English => "Current position",
                    Language::Japanese => "現在地",
                };
                let location = Location::new(
                    CURRENT_POSITION_ID,
                    label,
                    position.latitude,
                    position.longitude,
                );
                self.locations.retain(|l| l.id != CURRENT_POSITION_ID);
                self.locations.push(location.clone());
                self.selected = location;
                self.overview = None;
                vec![self.fetch_primary()]
            }
            Action::PositionResolved(Err(e)) => {
                tracing::warn!("Geolocation failed: {}", e);
                self.status = Some(AppError::Geolocation(e).status_message());
                Vec::new()
            }
            Action::SubmitLog(input) => {
                if let Err(errors) = input.validate() {
                    self.status = Some(AppError::from(errors).status_message());
                    return Vec::new();
                }
                let log = input.into_log(self.today);
                self.history = upsert_log(&self.history, log);
                self.summary = HistorySummary::from_logs(&self.history);
                self.status = Some(StatusMessage::log_saved());
                vec![Effect::PersistLogs(self.history.clone())]
            }
            Action::ToggleAction(key) => {
                self.checklist.toggle(key);
                vec![Effect::PersistChecklist(self.checklist.clone())]
            }
            Action::DayChanged(date) => {
                if date == self.today {
                    return Vec::new();
                }
                self.today = date;
                vec![self.fetch_primary(), self.fetch_map()]
            }
            Action::SetLanguage(language) => {
                self.language = language;
                self.overview = self.overview.take().map(|o| o.translated(language));
                Vec::new()
            }
            Action::PersistenceFailed(e) => {
                tracing::warn!("Persisting local state failed: {}", e);
                self.status = Some(e.status_message());
                Vec::new()
            }
            Action::DismissStatus => {
                self.status = None;
                self.map_status = None;
                Vec::new()
            }
        }
    }

    fn fetch_primary(&mut self) -> Effect {
        Effect::FetchPrimary {
            id: self.requests.issue(RequestSlot::Primary),
            location: self.selected.clone(),
        }
    }

    fn fetch_map(&mut self) -> Effect {
        Effect::FetchMap {
            id: self.requests.issue(RequestSlot::Map),
            date: self.today,
        }
    }

    fn clear_status(&mut self, code: &str) {
        if self.status.as_ref().map(|s| s.code == code).unwrap_or(false) {
            self.status = None;
        }
    }
}
