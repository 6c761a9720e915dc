//! JWT token provider for issuing and verifying tokens.

use super::{TokenKind, TokenPayload};
use booking_config::SecurityConfig;
use booking_core::{BookingError, BookingResult, Interface};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use shaku::Component;
use tracing::{debug, error, warn};

/// Interface for token operations.
pub trait TokenProviderInterface: Interface + Send + Sync {
    /// Signs a token of `kind` for the user `id` and login subject `email`.
    fn generate_token(&self, id: &str, email: &str, kind: TokenKind) -> BookingResult<String>;

    /// Verifies a refresh token. Missing, invalid and expired tokens are `None`.
    fn verify_refresh_token(&self, token: &str) -> Option<TokenPayload>;

    /// Verifies an access token.
    fn verify_access_token(&self, token: &str) -> BookingResult<TokenPayload>;
}

/// Secret and lifetime for one token kind.
#[derive(Clone)]
pub struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_secs: i64,
}

impl SigningKeys {
    fn new(secret: &str, lifetime_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs: i64::try_from(lifetime_secs).unwrap_or(i64::MAX),
        }
    }
}

fn token_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp"]);
    validation
}

/// HS256 token provider with separate access and refresh secrets.
#[derive(Component, Clone)]
#[shaku(interface = TokenProviderInterface)]
pub struct TokenProvider {
    access: SigningKeys,
    refresh: SigningKeys,
    #[shaku(default = token_validation())]
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: &SecurityConfig) -> Self {
        Self {
            access: SigningKeys::new(
                &config.access_token_secret,
                config.access_token_expiration_secs,
            ),
            refresh: SigningKeys::new(
                &config.refresh_token_secret,
                config.refresh_token_expiration_secs,
            ),
            validation: token_validation(),
        }
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn decode(&self, token: &str, kind: TokenKind) -> BookingResult<TokenPayload> {
        if token.is_empty() {
            return Err(BookingError::unauthorized("Token is missing"));
        }

        decode::<TokenPayload>(token, &self.keys(kind).decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("{} token validation failed: {}", kind, e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => BookingError::unauthorized("Token expired"),
                    _ => BookingError::unauthorized("Invalid token"),
                }
            })
    }
}

impl From<TokenProvider> for TokenProviderParameters {
    fn from(provider: TokenProvider) -> Self {
        Self {
            access: provider.access,
            refresh: provider.refresh,
            validation: provider.validation,
        }
    }
}

impl TokenProviderInterface for TokenProvider {
    fn generate_token(&self, id: &str, email: &str, kind: TokenKind) -> BookingResult<String> {
        if id.is_empty() || email.is_empty() {
            warn!("Cannot issue a {} token without id and subject", kind);
            return Err(BookingError::internal("token id and subject are required"));
        }

        let keys = self.keys(kind);
        let expires_at = Duration::try_seconds(keys.lifetime_secs)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                error!("{} token lifetime of {}s is out of range", kind, keys.lifetime_secs);
                BookingError::internal(format!("{} token lifetime is out of range", kind))
            })?;
        let payload = TokenPayload::new(id.to_string(), email.to_string(), expires_at);

        let token = encode(&Header::new(Algorithm::HS256), &payload, &keys.encoding).map_err(|e| {
            error!("Failed to sign {} token: {}", kind, e);
            BookingError::internal(format!("Failed to sign {} token: {}", kind, e))
        })?;

        debug!("Generated {} token for user {}", kind, id);
        Ok(token)
    }

    fn verify_refresh_token(&self, token: &str) -> Option<TokenPayload> {
        self.decode(token, TokenKind::Refresh).ok()
    }

    fn verify_access_token(&self, token: &str) -> BookingResult<TokenPayload> {
        self.decode(token, TokenKind::Access)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("access_lifetime_secs", &self.access.lifetime_secs)
            .field("refresh_lifetime_secs", &self.refresh.lifetime_secs)
            .finish_non_exhaustive()
    }
}
