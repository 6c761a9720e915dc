//! Authentication service implementation.

use crate::dto::{LoginRequest, RegisterRequest};
use booking_core::{BookingError, BookingResult, Interface, User, UserId, UserRole};
use booking_repository::UserRepository;
use booking_security::{set_auth_headers, PasswordHasherInterface, TokenKind, TokenProviderInterface};
use async_trait::async_trait;
use hyper::HeaderMap;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const WRONG_CREDENTIALS: &str = "Wrong credentials";
const LOGIN_AGAIN: &str = "Please log in again";

/// Authentication service trait.
///
/// Each flow writes the issued tokens onto `headers`.
#[async_trait]
pub trait AuthService: Interface + Send + Sync {
    /// Logs in a user by email and password.
    async fn login(&self, headers: &mut HeaderMap, request: LoginRequest) -> BookingResult<User>;

    /// Issues a fresh access token for a valid refresh token.
    async fn refresh_token(
        &self,
        headers: &mut HeaderMap,
        token: Option<&str>,
    ) -> BookingResult<User>;

    /// Registers a new user with the `USER` role.
    async fn register(
        &self,
        headers: &mut HeaderMap,
        request: RegisterRequest,
    ) -> BookingResult<User>;
}

/// Authentication service implementation.
#[derive(Component)]
#[shaku(interface = AuthService)]
pub struct AuthServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    token_provider: Arc<dyn TokenProviderInterface>,
}

impl AuthServiceImpl {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        token_provider: Arc<dyn TokenProviderInterface>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_provider,
        }
    }

    /// Signs an access and refresh token pair for the user.
    fn issue_tokens(&self, user: &User) -> BookingResult<(String, String)> {
        let id = user.id.to_string();
        let subject = user.token_subject();

        let access = self.token_provider.generate_token(&id, subject, TokenKind::Access);
        let refresh = self.token_provider.generate_token(&id, subject, TokenKind::Refresh);

        match (access, refresh) {
            (Ok(access), Ok(refresh)) => Ok((access, refresh)),
            (Err(e), _) | (_, Err(e)) => {
                error!("Could not generate tokens for user {}: {}", user.id, e);
                Err(BookingError::general())
            }
        }
    }

    fn write_headers(headers: &mut HeaderMap, access: &str, refresh: &str) -> BookingResult<()> {
        if set_auth_headers(Some(headers), access, refresh) {
            Ok(())
        } else {
            warn!("Could not set auth headers");
            Err(BookingError::general())
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, headers: &mut HeaderMap, request: LoginRequest) -> BookingResult<User> {
        debug!("Login attempt for: {}", request.email);

        if request.email.is_empty() || request.password.is_empty() {
            warn!("Login called without email or password");
            return Err(BookingError::general());
        }

        let user = match self.user_repository.find_by_email(&request.email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("Login failed: user not found - {}", request.email);
                return Err(BookingError::unauthorized(WRONG_CREDENTIALS));
            }
            Err(e) => {
                error!("Login failed: user lookup fault - {}", e);
                return Err(BookingError::unauthorized(WRONG_CREDENTIALS));
            }
        };

        if !self.password_hasher.verify(&user.password_hash, &request.password) {
            warn!("Login failed: invalid password - {}", user.id);
            return Err(BookingError::unauthorized(WRONG_CREDENTIALS));
        }

        let (access, refresh) = self.issue_tokens(&user)?;
        Self::write_headers(headers, &access, &refresh)?;

        info!("User logged in: {}", user.id);
        Ok(user)
    }

    async fn refresh_token(
        &self,
        headers: &mut HeaderMap,
        token: Option<&str>,
    ) -> BookingResult<User> {
        debug!("Refreshing token");

        let Some(token) = token.filter(|t| !t.is_empty()) else {
            warn!("Refresh called without a token");
            return Err(BookingError::unauthorized("Token is missing"));
        };

        let payload = self
            .token_provider
            .verify_refresh_token(token)
            .filter(|p| !p.data.id.is_empty() && !p.data.email.is_empty())
            .ok_or_else(|| {
                warn!("Invalid refresh token");
                BookingError::unauthorized(LOGIN_AGAIN)
            })?;

        let user_id = UserId::parse(&payload.data.id).map_err(|_| {
            warn!("Refresh token carries a malformed user id");
            BookingError::unauthorized(LOGIN_AGAIN)
        })?;

        let user = match self.user_repository.find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("Refresh failed: user {} no longer exists", user_id);
                return Err(BookingError::unauthorized(LOGIN_AGAIN));
            }
            Err(e) => {
                error!("Refresh failed: user lookup fault - {}", e);
                return Err(BookingError::unauthorized(LOGIN_AGAIN));
            }
        };

        let access = self
            .token_provider
            .generate_token(&payload.data.id, &payload.data.email, TokenKind::Access)
            .map_err(|e| {
                error!("Could not generate access token: {}", e);
                BookingError::general()
            })?;

        // The caller keeps its refresh token.
        Self::write_headers(headers, &access, token)?;

        info!("Token refreshed for user: {}", user.id);
        Ok(user)
    }

    async fn register(
        &self,
        headers: &mut HeaderMap,
        request: RegisterRequest,
    ) -> BookingResult<User> {
        debug!("Registering user: {}", request.username);

        match self
            .user_repository
            .find_by_email_or_username(&request.email, &request.username)
            .await
        {
            Ok(None) => {}
            Ok(Some(_)) => {
                debug!("Registration rejected: user exists - {}", request.email);
                return Err(BookingError::conflict("User already exists"));
            }
            Err(e) => {
                error!("Registration failed: user lookup fault - {}", e);
                return Err(BookingError::general());
            }
        }

        let password_hash = self.password_hasher.hash(&request.password).map_err(|e| {
            warn!("Could not hash password: {}", e);
            BookingError::general()
        })?;

        let user = User::new(
            request.username,
            request.email,
            password_hash,
            Some(UserRole::User),
        );

        let saved = self.user_repository.save(&user).await.map_err(|e| {
            warn!("Could not save user: {}", e);
            BookingError::general()
        })?;

        let (access, refresh) = self.issue_tokens(&saved)?;
        Self::write_headers(headers, &access, &refresh)?;

        info!("User registered: {}", saved.id);
        Ok(saved)
    }
}

impl std::fmt::Debug for AuthServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceImpl").finish_non_exhaustive()
    }
}
