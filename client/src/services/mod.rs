//! Fetch-and-score workflows composing the provider with the engine

pub mod dashboard;
pub mod map;

pub use dashboard::{fetch_location_weather, LocationWeather, RiskOverview};
pub use map::{fetch_map, MapOutcome};
