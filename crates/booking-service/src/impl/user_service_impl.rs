//! User service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::CreateUser;
use crate::user_service::UserService;
use booking_core::{BookingError, BookingResult, User, UserId, UserRole};
use booking_repository::UserRepository;
use booking_security::PasswordHasherInterface;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// User service backed by a repository and the shared cache.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            cache,
        }
    }

    fn hash_password(&self, plaintext: &str) -> BookingResult<String> {
        self.password_hasher.hash(plaintext).map_err(|e| {
            warn!("Could not hash password: {}", e);
            BookingError::general()
        })
    }

    async fn save(&self, user: &User) -> BookingResult<User> {
        self.user_repository.save(user).await.map_err(|e| {
            warn!("Could not save user {}: {}", user.id, e);
            BookingError::general()
        })
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn add_user(&self, request: Option<CreateUser>) -> BookingResult<User> {
        let Some(request) = request else {
            warn!("add_user called without a payload");
            return Err(BookingError::general());
        };
        debug!("Adding user: {}", request.username);

        match self.user_repository.find_by_email(&request.email).await {
            Ok(None) => {}
            Ok(Some(_)) => return Err(BookingError::conflict("User already exists")),
            Err(e) => {
                error!("Duplicate check failed for {}: {}", request.email, e);
                return Err(BookingError::general());
            }
        }

        let password_hash = self.hash_password(&request.password)?;
        let mut user = User::new(
            request.username,
            request.email,
            password_hash,
            Some(request.role.unwrap_or(UserRole::User)),
        );
        user.first_name = request.first_name;
        user.last_name = request.last_name;

        let saved = self.save(&user).await?;
        self.cache.flush().await;

        info!("User added: {}", saved.id);
        Ok(saved)
    }

    async fn change_password(
        &self,
        id: &str,
        old_password: &str,
        new_password: &str,
    ) -> BookingResult<User> {
        debug!("Changing password for user: {}", id);

        if id.is_empty() || old_password.is_empty() || new_password.is_empty() {
            warn!("change_password called with an empty argument");
            return Err(BookingError::general());
        }
        if old_password == new_password {
            return Err(BookingError::bad_request("Passwords are same"));
        }

        let found = match UserId::parse(id) {
            Ok(user_id) => self.user_repository.find_by_id(user_id).await,
            Err(_) => Ok(None),
        };
        let mut user = match found {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("change_password: user {} not found", id);
                return Err(BookingError::not_found("User", id));
            }
            Err(e) => {
                warn!("change_password: lookup for {} failed: {}", id, e);
                return Err(BookingError::not_found("User", id));
            }
        };

        if !self.password_hasher.verify(&user.password_hash, old_password) {
            return Err(BookingError::unauthorized("Wrong password"));
        }

        let password_hash = self.hash_password(new_password)?;
        user.change_password(password_hash);

        let saved = self.save(&user).await?;
        self.cache.flush().await;

        info!("Password changed for user: {}", saved.id);
        Ok(saved)
    }

    async fn get_all_users(&self) -> BookingResult<Vec<User>> {
        debug!("Listing users");

        self.user_repository.find_all().await.map_err(|e| {
            error!("Could not list users: {}", e);
            BookingError::general()
        })
    }

    async fn get_user_by_id(
        &self,
        id: &str,
        tolerate_missing: bool,
    ) -> BookingResult<Option<User>> {
        debug!("Getting user: {}", id);

        let missing = || {
            if tolerate_missing {
                Ok(None)
            } else {
                Err(BookingError::not_found("User", id))
            }
        };

        let Ok(user_id) = UserId::parse(id) else {
            debug!("Malformed user id: {}", id);
            return missing();
        };

        let cache_key = cache_keys::user_key(user_id);
        if let Some(cached) = self.cache.get::<User>(&cache_key).await {
            debug!("Cache hit for user: {}", id);
            return Ok(Some(cached));
        }

        let user = match self.user_repository.find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return missing(),
            Err(e) => {
                warn!("Lookup for user {} failed: {}", id, e);
                return missing();
            }
        };

        if let Err(e) = self.cache.set(&cache_key, &user).await {
            warn!("Could not cache user {}: {}", id, e);
        }
        Ok(Some(user))
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LruCache;
    use crate::test_support::{self, MockCache, MockUserRepo};
    use booking_repository::memory::InMemoryUserRepository;

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        cache: Arc<LruCache>,
        service: UserServiceImpl,
    }

    fn fixture() -> Fixture {
        let cache = test_support::cache();
        let users = Arc::new(InMemoryUserRepository::with_invalidator(cache.clone()));
        let service = UserServiceImpl::new(users.clone(), test_support::hasher(), cache.clone());
        Fixture {
            users,
            cache,
            service,
        }
    }

    fn create_request(username: &str, email: &str, role: Option<UserRole>) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password: "p1".to_string(),
            role,
            first_name: Some("Ada".to_string()),
            last_name: None,
        }
    }

    fn seed(fixture: &Fixture, email: &str, password: &str) -> User {
        let user = test_support::user_with_password(
            &*test_support::hasher(),
            email,
            password,
            UserRole::User,
        );
        fixture.users.insert(user.clone());
        user
    }

    #[tokio::test]
    async fn test_add_user_defaults_role() {
        let fixture = fixture();

        let user = fixture
            .service
            .add_user(Some(create_request("ada", "ada@x.io", None)))
            .await
            .unwrap();

        assert_eq!(user.role, Some(UserRole::User));
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_ne!(user.password_hash, "p1");
    }

    #[tokio::test]
    async fn test_add_user_keeps_requested_role() {
        let fixture = fixture();
        let user = fixture
            .service
            .add_user(Some(create_request("root", "root@x.io", Some(UserRole::Admin))))
            .await
            .unwrap();
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_add_user_without_payload() {
        let err = fixture().service.add_user(None).await.unwrap_err();
        assert!(matches!(err, BookingError::General(_)));
    }

    #[tokio::test]
    async fn test_add_user_duplicate_email() {
        let fixture = fixture();
        seed(&fixture, "ada@x.io", "p1");

        let err = fixture
            .service
            .add_user(Some(create_request("other", "ada@x.io", None)))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_add_user_flushes_cache() {
        let fixture = fixture();
        let existing = seed(&fixture, "a@x.io", "p1");
        fixture
            .service
            .get_user_by_id(&existing.id.to_string(), false)
            .await
            .unwrap();
        assert_eq!(fixture.cache.entry_count().await, 1);

        fixture
            .service
            .add_user(Some(create_request("ada", "ada@x.io", None)))
            .await
            .unwrap();
        assert_eq!(fixture.cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_change_password() {
        let fixture = fixture();
        let user = seed(&fixture, "a@x.io", "old");

        let updated = fixture
            .service
            .change_password(&user.id.to_string(), "old", "new")
            .await
            .unwrap();

        let hasher = test_support::hasher();
        assert!(hasher.verify(&updated.password_hash, "new"));
        assert!(!hasher.verify(&updated.password_hash, "old"));
    }

    #[tokio::test]
    async fn test_change_password_same_password() {
        let fixture = fixture();
        let user = seed(&fixture, "a@x.io", "same");

        let err = fixture
            .service
            .change_password(&user.id.to_string(), "same", "same")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::BadRequest(ref m) if m == "Passwords are same"));
    }

    #[tokio::test]
    async fn test_change_password_wrong_old_password() {
        let fixture = fixture();
        let user = seed(&fixture, "a@x.io", "old");

        let err = fixture
            .service
            .change_password(&user.id.to_string(), "guess", "new")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Unauthorized(ref m) if m == "Wrong password"));
    }

    #[tokio::test]
    async fn test_change_password_unknown_user() {
        let fixture = fixture();
        let err = fixture
            .service
            .change_password(&UserId::new().to_string(), "old", "new")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_change_password_empty_argument() {
        let fixture = fixture();
        let err = fixture
            .service
            .change_password("", "old", "new")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::General(_)));
    }

    #[tokio::test]
    async fn test_cached_read_is_dropped_after_password_change() {
        let fixture = fixture();
        let user = seed(&fixture, "a@x.io", "old");
        let id = user.id.to_string();

        let before = fixture.service.get_user_by_id(&id, false).await.unwrap().unwrap();
        fixture.service.change_password(&id, "old", "new").await.unwrap();
        let after = fixture.service.get_user_by_id(&id, false).await.unwrap().unwrap();

        assert_ne!(before.password_hash, after.password_hash);
    }

    #[tokio::test]
    async fn test_get_all_users_empty() {
        assert!(fixture().service.get_all_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_users_fault_is_general() {
        let mut users = MockUserRepo::new();
        users
            .expect_find_all()
            .returning(|| Err(BookingError::Database("gone".to_string())));
        let service = UserServiceImpl::new(
            Arc::new(users),
            test_support::hasher(),
            test_support::cache(),
        );

        let err = service.get_all_users().await.unwrap_err();
        assert!(matches!(err, BookingError::General(_)));
    }

    #[tokio::test]
    async fn test_get_user_by_id_missing() {
        let fixture = fixture();
        let id = UserId::new().to_string();

        assert!(fixture.service.get_user_by_id(&id, true).await.unwrap().is_none());
        let err = fixture.service.get_user_by_id(&id, false).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound { resource_type: "User", .. }));

        assert!(fixture
            .service
            .get_user_by_id("not-a-uuid", true)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_get_user_by_id_store_fault_reads_as_absent() {
        let mut users = MockUserRepo::new();
        users
            .expect_find_by_id()
            .returning(|_| Err(BookingError::Database("timeout".to_string())));
        let service = UserServiceImpl::new(
            Arc::new(users),
            test_support::hasher(),
            test_support::cache(),
        );

        let found = service
            .get_user_by_id(&UserId::new().to_string(), true)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_cache_hit_never_touches_store() {
        let user = User::new(
            "ada".to_string(),
            "ada@x.io".to_string(),
            "hash".to_string(),
            Some(UserRole::Admin),
        );
        let cached = serde_json::to_string(&user).unwrap();
        let expected_key = cache_keys::user_key(user.id);

        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .withf(move |key| key == expected_key)
            .returning(move |_| Some(cached.clone()));
        cache.expect_set_raw().never();

        let mut users = MockUserRepo::new();
        users.expect_find_by_id().never();

        let service =
            UserServiceImpl::new(Arc::new(users), test_support::hasher(), Arc::new(cache));

        let found = service
            .get_user_by_id(&user.id.to_string(), false)
            .await
            .unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn test_miss_populates_cache() {
        let fixture = fixture();
        let user = seed(&fixture, "a@x.io", "p1");

        fixture
            .service
            .get_user_by_id(&user.id.to_string(), false)
            .await
            .unwrap();

        let cached: Option<User> = fixture.cache.get(&cache_keys::user_key(user.id)).await;
        assert_eq!(cached, Some(user));
    }
}
