use crate::UserRepository;
use booking_core::{BookingError, BookingResult, CacheInvalidator, User, UserId};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
    cache: Option<Arc<dyn CacheInvalidator>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository with no cache to flush.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository that flushes `cache` after each save.
    #[must_use]
    pub fn with_invalidator(cache: Arc<dyn CacheInvalidator>) -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            cache: Some(cache),
        }
    }

    /// Seeds a user directly, bypassing uniqueness checks and the flush.
    pub fn insert(&self, user: User) {
        self.users.lock().insert(user.id, user);
    }

    /// Returns the number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.lock().len()
    }

    /// Checks whether no user is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.lock().is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> BookingResult<Vec<User>> {
        let mut users: Vec<User> = self.users.lock().values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn find_by_email(&self, email: &str) -> BookingResult<Option<User>> {
        if email.is_empty() {
            warn!("find_by_email called without an email");
            return Ok(None);
        }
        Ok(self
            .users
            .lock()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> BookingResult<Option<User>> {
        if email.is_empty() && username.is_empty() {
            warn!("find_by_email_or_username called without an email or username");
            return Ok(None);
        }
        Ok(self
            .users
            .lock()
            .values()
            .find(|u| u.email == email || u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> BookingResult<Option<User>> {
        Ok(self.users.lock().get(&id).cloned())
    }

    async fn save(&self, user: &User) -> BookingResult<User> {
        {
            let mut users = self.users.lock();
            let taken = users.values().any(|u| {
                u.id != user.id && (u.email == user.email || u.username == user.username)
            });
            if taken {
                return Err(BookingError::conflict("User already exists"));
            }
            users.insert(user.id, user.clone());
        }
        debug!("Stored user {}", user.id);

        if let Some(cache) = &self.cache {
            cache.flush().await;
        }
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingInvalidator(AtomicUsize);

    #[async_trait]
    impl CacheInvalidator for CountingInvalidator {
        async fn flush(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn create_test_user(username: &str, email: &str) -> User {
        User::new(
            username.to_string(),
            email.to_string(),
            "hashed_password".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("testuser", "test@example.com");

        repo.save(&user).await.unwrap();

        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.username, "testuser");
        assert!(repo.find_by_id(UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_updates_existing_user() {
        let repo = InMemoryUserRepository::new();
        let mut user = create_test_user("testuser", "test@example.com");
        repo.save(&user).await.unwrap();

        user.change_password("new_hash".to_string());
        repo.save(&user).await.unwrap();

        assert_eq!(repo.len(), 1);
        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.password_hash, "new_hash");
    }

    #[tokio::test]
    async fn test_duplicate_email_or_username_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.save(&create_test_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let same_email = create_test_user("other", "alice@example.com");
        assert!(matches!(
            repo.save(&same_email).await,
            Err(BookingError::Conflict(_))
        ));

        let same_username = create_test_user("alice", "other@example.com");
        assert!(matches!(
            repo.save(&same_username).await,
            Err(BookingError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_email_or_username() {
        let repo = InMemoryUserRepository::new();
        repo.insert(create_test_user("alice", "alice@example.com"));

        assert!(repo
            .find_by_email_or_username("alice@example.com", "nobody")
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_by_email_or_username("nobody@example.com", "alice")
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_by_email_or_username("", "")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_empty_email_is_absent() {
        let repo = InMemoryUserRepository::new();
        repo.insert(create_test_user("alice", "alice@example.com"));
        assert!(repo.find_by_email("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_flushes_cache() {
        let invalidator = Arc::new(CountingInvalidator::default());
        let repo = InMemoryUserRepository::with_invalidator(invalidator.clone());

        repo.save(&create_test_user("alice", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(invalidator.0.load(Ordering::SeqCst), 1);

        let _ = repo
            .save(&create_test_user("alice", "dupe@example.com"))
            .await;
        assert_eq!(invalidator.0.load(Ordering::SeqCst), 1);
    }
}
