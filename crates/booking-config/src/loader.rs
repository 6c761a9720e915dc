//! Configuration loader with layered sources.

use crate::{parse_duration_secs, AppConfig, ConfigValidator};
use booking_core::BookingError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Flat variable names from the first deployments, mapped onto config keys.
const LEGACY_STRING_VARS: &[(&str, &str)] = &[
    ("ACCESS_TOKEN_SIGNATURE", "security.access_token_secret"),
    ("REFRESH_TOKEN_SIGNATURE", "security.refresh_token_secret"),
    ("DB_HOST", "database.host"),
    ("DB_USER", "database.username"),
    ("DB_PASSWORD", "database.password"),
];

const LEGACY_DURATION_VARS: &[(&str, &str)] = &[
    ("ACCESS_TOKEN_EXPIRE", "security.access_token_expiration_secs"),
    ("REFRESH_TOKEN_EXPIRE", "security.refresh_token_expiration_secs"),
];

const LEGACY_NUMBER_VARS: &[(&str, &str)] = &[("PORT", "server.port"), ("DB_PORT", "database.port")];

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `.env` in the working directory, if present
    /// 2. `config/default.toml` - Default values
    /// 3. `config/{environment}.toml` - Environment-specific overrides
    /// 4. `config/local.toml` - Untracked local overrides
    /// 5. Environment variables with `BOOKING__` prefix
    /// 6. Legacy flat variables (`PORT`, `ACCESS_TOKEN_SIGNATURE`, ...)
    pub fn new(config_dir: impl Into<String>) -> Result<Self, BookingError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, BookingError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), BookingError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, BookingError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment_override = std::env::var("BOOKING_ENVIRONMENT").ok();
        let environment = environment_override
            .clone()
            .unwrap_or_else(|| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("BOOKING")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder = apply_legacy_overrides(builder, |name| std::env::var(name).ok())?;

        let mut app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_booking_error)?;

        if let Some(environment) = environment_override {
            app_config.app.environment = environment;
        }

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> Result<(), BookingError> {
        if !config.app.is_production()
            && config.security.access_token_secret.starts_with("change-me")
        {
            warn!("Using the default access token secret; set ACCESS_TOKEN_SIGNATURE");
        }

        ConfigValidator::validate(config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            BookingError::Configuration(message)
        })
    }
}

/// Applies the legacy flat variables on top of every other source.
///
/// `lookup` resolves a variable name; the loader passes the process
/// environment.
pub fn apply_legacy_overrides<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, BookingError>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in LEGACY_STRING_VARS {
        builder = builder
            .set_override_option(*key, lookup(var))
            .map_err(config_error_to_booking_error)?;
    }

    for (var, key) in LEGACY_DURATION_VARS {
        let secs = match lookup(var) {
            Some(raw) => Some(parse_duration_secs(&raw).ok_or_else(|| {
                BookingError::Configuration(format!("{} is not a valid lifetime: {}", var, raw))
            })?),
            None => None,
        };
        builder = builder
            .set_override_option(*key, secs.and_then(|s| i64::try_from(s).ok()))
            .map_err(config_error_to_booking_error)?;
    }

    for (var, key) in LEGACY_NUMBER_VARS {
        let number = match lookup(var) {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|_| {
                BookingError::Configuration(format!("{} is not a valid port: {}", var, raw))
            })?),
            None => None,
        };
        builder = builder
            .set_override_option(*key, number.map(i64::from))
            .map_err(config_error_to_booking_error)?;
    }

    Ok(builder)
}

fn config_error_to_booking_error(err: ConfigError) -> BookingError {
    BookingError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn build_with(vars: &[(&str, &str)]) -> Result<AppConfig, BookingError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let builder = apply_legacy_overrides(Config::builder(), |name| vars.get(name).cloned())?;
        builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_booking_error)
    }

    #[test]
    fn test_no_legacy_vars_keeps_defaults() {
        let config = build_with(&[]).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.security.access_token_expiration_secs, 900);
    }

    #[test]
    fn test_legacy_vars_override() {
        let config = build_with(&[
            ("PORT", "8081"),
            ("ACCESS_TOKEN_SIGNATURE", "access-secret"),
            ("ACCESS_TOKEN_EXPIRE", "15m"),
            ("REFRESH_TOKEN_EXPIRE", "7d"),
            ("DB_HOST", "mysql.internal"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.security.access_token_secret, "access-secret");
        assert_eq!(config.security.access_token_expiration_secs, 900);
        assert_eq!(config.security.refresh_token_expiration_secs, 604_800);
        assert_eq!(config.database.host, "mysql.internal");
    }

    #[test]
    fn test_spelled_out_lifetimes_are_accepted() {
        let config = build_with(&[
            ("ACCESS_TOKEN_EXPIRE", "1h30m"),
            ("REFRESH_TOKEN_EXPIRE", "2 days"),
        ])
        .unwrap();

        assert_eq!(config.security.access_token_expiration_secs, 5_400);
        assert_eq!(config.security.refresh_token_expiration_secs, 172_800);
    }

    #[test]
    fn test_bad_lifetime_is_a_configuration_error() {
        let err = build_with(&[("ACCESS_TOKEN_EXPIRE", "soon")]).unwrap_err();
        assert!(matches!(err, BookingError::Configuration(_)));
    }

    #[test]
    fn test_bad_port_is_a_configuration_error() {
        let err = build_with(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, BookingError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_loads_from_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("default.toml")).unwrap();
        writeln!(
            file,
            "[cache]\nmax_capacity = 42\n\n[venues]\ndefault_query_limit = 25"
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        let config = loader.get().await;
        assert_eq!(config.cache.max_capacity, 42);
        assert_eq!(config.venues.default_query_limit, 25);
    }
}
