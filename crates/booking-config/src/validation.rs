//! Configuration validation.
//!
//! Collects every problem in one pass so a misconfigured deployment fails at
//! startup with the full list instead of one error per restart.

use crate::AppConfig;
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A signing secret is empty.
    MissingSecret { name: &'static str },
    /// A signing secret is too short for a production deployment.
    SecretTooShort {
        name: &'static str,
        actual: usize,
        minimum: usize,
    },
    /// Access and refresh tokens share one secret.
    SharedSecret,
    /// Port number is invalid.
    InvalidPort { value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Database URL does not use the MySQL scheme.
    InvalidDatabaseUrl,
    /// Timeout or lifetime must be positive.
    NonPositiveDuration { name: &'static str },
    /// Token lifetime exceeds the supported maximum.
    LifetimeTooLong {
        name: &'static str,
        value: u64,
        maximum: u64,
    },
    /// Cache capacity must be positive.
    InvalidCacheCapacity,
    /// Default venue page size must be positive.
    InvalidQueryLimit { value: i64 },
    /// Log format is unknown.
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSecret { name } => write!(f, "{} must not be empty", name),
            Self::SecretTooShort {
                name,
                actual,
                minimum,
            } => write!(
                f,
                "{} too short: {} characters (minimum {})",
                name, actual, minimum
            ),
            Self::SharedSecret => write!(
                f,
                "access and refresh tokens must use different secrets"
            ),
            Self::InvalidPort { value } => write!(f, "Invalid server port: {}", value),
            Self::InvalidPoolSize { min, max } => write!(
                f,
                "Invalid pool size: min ({}) cannot be greater than max ({})",
                min, max
            ),
            Self::InvalidDatabaseUrl => write!(f, "Database URL must start with mysql://"),
            Self::NonPositiveDuration { name } => write!(f, "'{}' must be positive", name),
            Self::LifetimeTooLong {
                name,
                value,
                maximum,
            } => write!(f, "'{}' is {}s, maximum is {}s", name, value, maximum),
            Self::InvalidCacheCapacity => write!(f, "cache.max_capacity must be positive"),
            Self::InvalidQueryLimit { value } => {
                write!(f, "venues.default_query_limit must be positive, got {}", value)
            }
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{}' (valid: pretty, json)", value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Minimum signing secret length in production.
    const MIN_SECRET_LENGTH: usize = 32;

    /// Longest accepted token lifetime: ten years.
    pub const MAX_TOKEN_LIFETIME_SECS: u64 = 10 * 365 * 24 * 60 * 60;

    /// Validates the entire application configuration.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_security(config, &mut errors);
        Self::validate_server(config, &mut errors);
        Self::validate_database(config, &mut errors);
        Self::validate_cache(config, &mut errors);

        if config.venues.default_query_limit <= 0 {
            errors.push(ConfigValidationError::InvalidQueryLimit {
                value: config.venues.default_query_limit,
            });
        }

        let format = config.observability.log_format.to_lowercase();
        if format != "pretty" && format != "json" {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: config.observability.log_format.clone(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_security(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let security = &config.security;
        let secrets = [
            ("security.access_token_secret", &security.access_token_secret),
            ("security.refresh_token_secret", &security.refresh_token_secret),
        ];

        for (name, secret) in secrets {
            if secret.is_empty() {
                errors.push(ConfigValidationError::MissingSecret { name });
            } else if config.app.is_production() && secret.len() < Self::MIN_SECRET_LENGTH {
                errors.push(ConfigValidationError::SecretTooShort {
                    name,
                    actual: secret.len(),
                    minimum: Self::MIN_SECRET_LENGTH,
                });
            }
        }

        if !security.access_token_secret.is_empty()
            && security.access_token_secret == security.refresh_token_secret
        {
            errors.push(ConfigValidationError::SharedSecret);
        }

        let lifetimes = [
            (
                "security.access_token_expiration_secs",
                security.access_token_expiration_secs,
            ),
            (
                "security.refresh_token_expiration_secs",
                security.refresh_token_expiration_secs,
            ),
        ];

        for (name, value) in lifetimes {
            if value == 0 {
                errors.push(ConfigValidationError::NonPositiveDuration { name });
            } else if value > Self::MAX_TOKEN_LIFETIME_SECS {
                errors.push(ConfigValidationError::LifetimeTooLong {
                    name,
                    value,
                    maximum: Self::MAX_TOKEN_LIFETIME_SECS,
                });
            }
        }
    }

    fn validate_server(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                value: config.server.port,
            });
        }
        if config.server.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "server.request_timeout_secs",
            });
        }
    }

    fn validate_database(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let database = &config.database;
        if !database.connection_url().starts_with("mysql://") {
            errors.push(ConfigValidationError::InvalidDatabaseUrl);
        }
        if database.min_connections > database.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: database.min_connections,
                max: database.max_connections,
            });
        }
        if database.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "database.connect_timeout_secs",
            });
        }
    }

    fn validate_cache(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.cache.max_capacity == 0 {
            errors.push(ConfigValidationError::InvalidCacheCapacity);
        }
        if config.cache.ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "cache.ttl_secs",
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let mut config = AppConfig::default();
        config.security.access_token_secret = String::new();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.contains(&ConfigValidationError::MissingSecret {
            name: "security.access_token_secret"
        }));
    }

    #[test]
    fn test_short_secret_only_rejected_in_production() {
        let mut config = AppConfig::default();
        config.security.access_token_secret = "short".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.app.environment = "production".to_string();
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ConfigValidationError::SecretTooShort { actual: 5, .. }
        ));
    }

    #[test]
    fn test_shared_secret_is_rejected() {
        let mut config = AppConfig::default();
        config.security.refresh_token_secret = config.security.access_token_secret.clone();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors, vec![ConfigValidationError::SharedSecret]);
    }

    #[test]
    fn test_token_lifetime_is_bounded() {
        let mut config = AppConfig::default();
        config.security.refresh_token_expiration_secs = ConfigValidator::MAX_TOKEN_LIFETIME_SECS;
        assert!(ConfigValidator::validate(&config).is_ok());

        config.security.access_token_expiration_secs = 100_000_000_000_000_000;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::LifetimeTooLong {
                name: "security.access_token_expiration_secs",
                value: 100_000_000_000_000_000,
                maximum: ConfigValidator::MAX_TOKEN_LIFETIME_SECS,
            }]
        );

        config.security.access_token_expiration_secs = 0;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::NonPositiveDuration {
                name: "security.access_token_expiration_secs"
            }]
        );
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.cache.max_capacity = 0;
        config.observability.log_format = "xml".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_non_mysql_url_is_rejected() {
        let mut config = AppConfig::default();
        config.database.url = "postgres://localhost/db".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors, vec![ConfigValidationError::InvalidDatabaseUrl]);
    }
}
