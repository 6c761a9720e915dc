//! Dependency injection module using Shaku.
//!
//! [`BookingModule`] holds one instance of every component. Runtime values
//! (the pool, the cache bounds, the signing keys) enter as component
//! parameters; everything else is injected. The single [`LruCache`] serves
//! the services directly and reaches the user repository through
//! [`CacheFlusher`].

use booking_config::{CacheConfig, SecurityConfig};
use booking_core::{BookingError, BookingResult, CacheInvalidator};
use booking_repository::{
    DatabasePool, DatabasePoolInterface, MySqlUserRepository, MySqlVenueRepository,
};
use booking_rest::AppState;
use booking_security::{PasswordHasher, TokenProvider, TokenProviderInterface};
use booking_service::{
    AuthService, AuthServiceImpl, CacheFlusher, CacheInterface, LruCache, UserService,
    UserServiceImpl, VenueService, VenueServiceImpl, DEFAULT_QUERY_LIMIT,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

module! {
    pub BookingModule {
        components = [
            DatabasePool,
            LruCache,
            CacheFlusher,
            PasswordHasher,
            TokenProvider,
            MySqlUserRepository,
            MySqlVenueRepository,
            UserServiceImpl,
            VenueServiceImpl,
            AuthServiceImpl,
        ],
        providers = [],
    }
}

/// The built component graph.
#[derive(Clone)]
pub struct AppModule {
    module: Arc<BookingModule>,
}

impl AppModule {
    /// Resolves the database pool.
    pub fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.module.resolve()
    }

    /// Resolves the shared cache.
    pub fn cache(&self) -> Arc<dyn CacheInterface> {
        self.module.resolve()
    }

    /// Resolves the invalidator handed to the user repository.
    pub fn cache_invalidator(&self) -> Arc<dyn CacheInvalidator> {
        self.module.resolve()
    }

    /// Resolves the token provider.
    pub fn token_provider(&self) -> Arc<dyn TokenProviderInterface> {
        self.module.resolve()
    }

    /// Resolves the user service.
    pub fn user_service(&self) -> Arc<dyn UserService> {
        self.module.resolve()
    }

    /// Resolves the auth service.
    pub fn auth_service(&self) -> Arc<dyn AuthService> {
        self.module.resolve()
    }

    /// Resolves the venue service.
    pub fn venue_service(&self) -> Arc<dyn VenueService> {
        self.module.resolve()
    }

    /// Builds the REST state, with the pool attached for readiness checks.
    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.auth_service(),
            self.user_service(),
            self.venue_service(),
            self.token_provider(),
        )
        .with_database(self.database_pool())
    }
}

/// Builder for [`AppModule`].
#[derive(Default)]
pub struct AppModuleBuilder {
    database_pool: Option<DatabasePool>,
    security_config: SecurityConfig,
    cache_config: CacheConfig,
    default_query_limit: Option<i64>,
    password_hasher: Option<PasswordHasher>,
}

impl AppModuleBuilder {
    /// Creates a builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the database pool. Required.
    #[must_use]
    pub fn with_database_pool(mut self, pool: DatabasePool) -> Self {
        self.database_pool = Some(pool);
        self
    }

    /// Sets the token signing configuration.
    #[must_use]
    pub fn with_security_config(mut self, config: SecurityConfig) -> Self {
        self.security_config = config;
        self
    }

    /// Sets the cache bounds.
    #[must_use]
    pub fn with_cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Sets the venue page size used when a query omits `limit`.
    #[must_use]
    pub fn with_default_query_limit(mut self, limit: i64) -> Self {
        self.default_query_limit = Some(limit);
        self
    }

    /// Overrides the password hasher.
    #[must_use]
    pub fn with_password_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.password_hasher = Some(hasher);
        self
    }

    /// Builds the module.
    ///
    /// Fails without a database pool or with an unusable cache configuration.
    pub fn build(self) -> BookingResult<AppModule> {
        let pool = self.database_pool.ok_or_else(|| {
            BookingError::Configuration("a database pool is required".to_string())
        })?;
        let cache = LruCache::new(&self.cache_config)?;
        let token_provider = TokenProvider::new(&self.security_config);
        let password_hasher = self.password_hasher.unwrap_or_default();
        let default_query_limit = self.default_query_limit.unwrap_or(DEFAULT_QUERY_LIMIT);

        let module = BookingModule::builder()
            .with_component_parameters::<DatabasePool>(pool.into())
            .with_component_parameters::<LruCache>(cache.into())
            .with_component_parameters::<PasswordHasher>(password_hasher.into())
            .with_component_parameters::<TokenProvider>(token_provider.into())
            .with_component_parameters::<VenueServiceImpl>(VenueServiceImpl::parameters(
                default_query_limit,
            ))
            .build();

        info!("Application components wired");
        Ok(AppModule {
            module: Arc::new(module),
        })
    }
}
