//! Application builder.

use crate::di::AppModuleBuilder;
use booking_config::AppConfig;
use booking_core::{BookingError, BookingResult};
use booking_repository::{DatabasePool, DatabasePoolInterface};
use booking_rest::create_router;
use tokio::signal;
use tracing::{info, warn};

/// Application builder for constructing and running the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    #[must_use]
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connects to the database, wires the components and serves until a
    /// shutdown signal arrives.
    pub async fn run(self) -> BookingResult<()> {
        let config = self.config.unwrap_or_default();

        let db_pool = DatabasePool::connect(&config.database).await?;
        if config.database.run_migrations {
            db_pool.run_migrations().await?;
        } else {
            warn!("Skipping database migrations");
        }

        let module = AppModuleBuilder::new()
            .with_database_pool(db_pool)
            .with_security_config(config.security.clone())
            .with_cache_config(config.cache.clone())
            .with_default_query_limit(config.venues.default_query_limit)
            .build()?;

        let router = create_router(module.app_state(), &config.server);

        let addr = config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| BookingError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        crate::startup::print_startup_info(&config.server);
        info!("Listening on http://{}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| BookingError::Internal(format!("Server error: {}", e)))?;

        module.database_pool().close().await;
        info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
