//! External integrations

pub mod geolocation;
pub mod open_meteo;

pub use geolocation::{acquire_position, ConfiguredPosition, GeolocationError, PositionSource};
pub use open_meteo::{AirQuality, Conditions, OpenMeteoClient, WeatherProvider};
