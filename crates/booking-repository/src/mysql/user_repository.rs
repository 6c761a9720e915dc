//! MySQL user repository implementation.

use crate::{in_transaction, traits::UserRepository, DatabasePoolInterface};
use booking_core::{BookingError, BookingResult, CacheInvalidator, User, UserId, UserRole};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::{FromRow, MySqlConnection};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, first_name, last_name, \
                            mobile_phone, created_at, updated_at";

/// MySQL user repository implementation.
///
/// Every successful [`save`](UserRepository::save) flushes the injected
/// cache, so memoized user reads never outlive a write.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct MySqlUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInvalidator>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, cache: Arc<dyn CacheInvalidator>) -> Self {
        Self { pool, cache }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String, // CHAR(36)
    username: String,
    email: String,
    password_hash: String,
    role: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    mobile_phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = BookingError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| BookingError::Database(format!("Invalid UUID in users.id: {}", e)))?;

        Ok(User {
            id: UserId::from_uuid(id),
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role.as_deref().and_then(|r| r.parse::<UserRole>().ok()),
            first_name: row.first_name,
            last_name: row.last_name,
            mobile_phone: row.mobile_phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

async fn select_user(conn: &mut MySqlConnection, id: &str) -> BookingResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users WHERE id = ?",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(User::try_from).transpose()
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_all(&self) -> BookingResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY created_at",
            USER_COLUMNS
        ))
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_email(&self, email: &str) -> BookingResult<Option<User>> {
        if email.is_empty() {
            warn!("find_by_email called without an email");
            return Ok(None);
        }
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
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
        debug!("Finding user by email {} or username {}", email, username);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = ? OR username = ? LIMIT 1",
            USER_COLUMNS
        ))
        .bind(email)
        .bind(username)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> BookingResult<Option<User>> {
        debug!("Finding user by id: {}", id);
        let mut conn = self.pool.inner().acquire().await?;
        select_user(&mut *conn, &id.to_string()).await
    }

    async fn save(&self, user: &User) -> BookingResult<User> {
        debug!("Saving user: {}", user.id);
        let user = user.clone();

        let saved = in_transaction(self.pool.inner(), move |conn| {
            Box::pin(async move {
                let id = user.id.to_string();
                let role = user.role.map(|r| r.as_str());

                let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ?")
                    .bind(&id)
                    .fetch_optional(&mut *conn)
                    .await?;

                if exists.is_some() {
                    sqlx::query(
                        r#"
                        UPDATE users
                        SET username = ?, email = ?, password_hash = ?, role = ?,
                            first_name = ?, last_name = ?, mobile_phone = ?, updated_at = ?
                        WHERE id = ?
                        "#,
                    )
                    .bind(&user.username)
                    .bind(&user.email)
                    .bind(&user.password_hash)
                    .bind(role)
                    .bind(&user.first_name)
                    .bind(&user.last_name)
                    .bind(&user.mobile_phone)
                    .bind(user.updated_at)
                    .bind(&id)
                    .execute(&mut *conn)
                    .await?;
                } else {
                    sqlx::query(
                        r#"
                        INSERT INTO users (id, username, email, password_hash, role,
                                           first_name, last_name, mobile_phone,
                                           created_at, updated_at)
                        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                        "#,
                    )
                    .bind(&id)
                    .bind(&user.username)
                    .bind(&user.email)
                    .bind(&user.password_hash)
                    .bind(role)
                    .bind(&user.first_name)
                    .bind(&user.last_name)
                    .bind(&user.mobile_phone)
                    .bind(user.created_at)
                    .bind(user.updated_at)
                    .execute(&mut *conn)
                    .await?;
                }

                // MySQL has no RETURNING, so read the row back
                select_user(conn, &id).await?.ok_or_else(|| {
                    BookingError::Database("Saved user could not be read back".to_string())
                })
            })
        })
        .await?;

        self.cache.flush().await;
        Ok(saved)
    }
}
