//! Pollen Watch client
//!
//! Orchestrates the pure engine in `shared`: fetches readings from the
//! weather provider, keeps the dashboard state, and persists symptom logs
//! and the daily checklist locally.

pub mod calendar;
pub mod config;
pub mod error;
pub mod external;
pub mod report;
pub mod services;
pub mod session;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult, StatusKind, StatusMessage};
pub use session::Session;
pub use state::{Action, DashboardState, Effect, RequestId, RequestSlot};
