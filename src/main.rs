//! Fitz - fitness tracking front-end

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fitz::app::App;
use fitz::config;
use fitz::services::Services;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitz=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting Fitz v{} ({})",
        env!("FITZ_VERSION"),
        env!("FITZ_GIT_SHA")
    );

    // Load configuration
    let config = config::load_config()?;
    let data_dir = config::get_data_dir();
    tracing::info!("Data directory: {:?}", data_dir);

    let services = Services::from_config(&config, data_dir)?;
    tracing::info!("Backend: {:?}", services.backend);

    dioxus::LaunchBuilder::new()
        .with_context(services)
        .launch(App);

    Ok(())
}
