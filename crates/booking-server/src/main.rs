//! # Venue Booking Server
//!
//! Main entry point for the venue booking API.

use booking_config::{ConfigLoader, ObservabilityConfig};
use booking_server::{app::AppBuilder, startup::init_logging};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);

    info!("Starting venue booking server...");
    info!("Environment: {}", config.app.environment);

    if let Err(e) = AppBuilder::new().with_config(config).run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
