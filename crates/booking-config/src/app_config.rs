//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed timeout for any outbound HTTP collaborator.
pub const OUTBOUND_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Token configuration.
    #[serde(default)]
    pub security: SecurityConfig,

    /// In-process cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Venue listing configuration.
    #[serde(default)]
    pub venues: VenueConfig,

    /// Logging configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "venue-booking".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

impl AppMetadata {
    /// Checks whether this is a production deployment.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// CORS allowed origins. `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: 30,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Returns the bind address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Database configuration.
///
/// `url` wins when set. Otherwise the URL is assembled from the parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full MySQL URL.
    pub url: String,
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database user.
    pub username: String,
    /// Database password.
    pub password: String,
    /// Schema name.
    pub name: String,
    /// Minimum connection pool size.
    pub min_connections: u32,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds.
    pub idle_timeout_secs: u64,
    /// Apply pending migrations at startup.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            host: "localhost".to_string(),
            port: 3306,
            username: "booking".to_string(),
            password: "booking".to_string(),
            name: "booking".to_string(),
            min_connections: 1,
            max_connections: 10,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Returns the effective connection URL.
    #[must_use]
    pub fn connection_url(&self) -> String {
        if self.url.is_empty() {
            format!(
                "mysql://{}:{}@{}:{}/{}",
                self.username, self.password, self.host, self.port, self.name
            )
        } else {
            self.url.clone()
        }
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the idle timeout as a Duration.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Token signing configuration.
///
/// Access and refresh tokens are signed with distinct secrets and carry
/// distinct lifetimes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Access token signing secret.
    pub access_token_secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiration_secs: u64,
    /// Refresh token signing secret.
    pub refresh_token_secret: String,
    /// Refresh token lifetime in seconds.
    pub refresh_token_expiration_secs: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            access_token_secret: "change-me-access-secret-in-production".to_string(),
            access_token_expiration_secs: 900,
            refresh_token_secret: "change-me-refresh-secret-in-production".to_string(),
            refresh_token_expiration_secs: 604_800,
        }
    }
}

impl SecurityConfig {
    /// Returns the access token lifetime.
    #[must_use]
    pub const fn access_token_expiration(&self) -> Duration {
        Duration::from_secs(self.access_token_expiration_secs)
    }

    /// Returns the refresh token lifetime.
    #[must_use]
    pub const fn refresh_token_expiration(&self) -> Duration {
        Duration::from_secs(self.refresh_token_expiration_secs)
    }
}

/// In-process cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries before least-recently-used eviction.
    pub max_capacity: u64,
    /// Entry lifetime in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 5000,
            ttl_secs: 24 * 60 * 60,
        }
    }
}

impl CacheConfig {
    /// Returns the entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Venue listing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueConfig {
    /// Page size used when a list request omits `limit`.
    pub default_query_limit: i64,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            default_query_limit: 10,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// Output format: `pretty` or `json`.
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Checks whether logs should be emitted as JSON.
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
