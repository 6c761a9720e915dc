//! Application state for Axum handlers.

use booking_repository::DatabasePoolInterface;
use booking_security::TokenProviderInterface;
use booking_service::{AuthService, UserService, VenueService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub venue_service: Arc<dyn VenueService>,
    pub token_provider: Arc<dyn TokenProviderInterface>,
    /// Checked by `/ready` when present.
    pub database: Option<Arc<dyn DatabasePoolInterface>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        venue_service: Arc<dyn VenueService>,
        token_provider: Arc<dyn TokenProviderInterface>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            venue_service,
            token_provider,
            database: None,
        }
    }

    /// Attaches the database pool checked by `/ready`.
    #[must_use]
    pub fn with_database(mut self, database: Arc<dyn DatabasePoolInterface>) -> Self {
        self.database = Some(database);
        self
    }
}
