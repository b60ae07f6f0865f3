//! Pollen Watch - terminal dashboard
//!
//! Loads persisted state, refreshes the selected location and the regional
//! map, and prints the result.

use std::sync::Arc;

use pollen_watch::calendar::today_in_reference_zone;
use pollen_watch::external::{ConfiguredPosition, OpenMeteoClient};
use pollen_watch::store::{load_state, FileStore};
use pollen_watch::{report, Action, Config, DashboardState, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pollen_watch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Pollen Watch");
    tracing::info!("Environment: {}", config.environment);

    let provider = Arc::new(OpenMeteoClient::from_config(&config.provider)?);
    let store = Arc::new(FileStore::new(&config.storage.data_dir));
    let positions = ConfiguredPosition::from_config(&config.geolocation);
    let use_position = positions.is_configured();

    let persisted = load_state(store.as_ref());
    tracing::info!("Loaded {} symptom logs", persisted.history.len());

    let state = DashboardState::new(
        today_in_reference_zone(),
        config.language(),
        &config.location.default_id,
        persisted,
    )?;

    let mut session = Session::new(state, provider, store, Arc::new(positions))
        .with_geolocation_timeout(config.geolocation_timeout());

    if use_position {
        session.dispatch(Action::RefreshMap).await;
        session.locate().await;
    } else {
        session.dispatch(Action::RefreshAll).await;
    }

    println!("{}", report::render(session.state()));
    Ok(())
}
