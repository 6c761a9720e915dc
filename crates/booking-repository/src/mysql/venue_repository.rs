//! MySQL venue repository implementation.

use crate::{in_transaction, traits::VenueRepository, DatabasePoolInterface};
use booking_core::{BookingError, BookingResult, Pagination, UserId, VenueId};
use booking_core::{Venue, VenueDetails, VenueFilter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::{FromRow, MySqlConnection};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const VENUE_COLUMNS: &str =
    "id, name, location, capacity, description, created_by, created_at, updated_at";

/// MySQL venue repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = VenueRepository)]
pub struct MySqlVenueRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlVenueRepository {
    /// Creates a new MySQL venue repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct VenueRow {
    id: String,
    name: String,
    location: String,
    capacity: i32,
    description: String,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VenueRow> for Venue {
    type Error = BookingError;

    fn try_from(row: VenueRow) -> Result<Self, Self::Error> {
        let parse = |column: &str, value: &str| {
            Uuid::parse_str(value).map_err(|e| {
                BookingError::Database(format!("Invalid UUID in venues.{}: {}", column, e))
            })
        };

        Ok(Venue {
            id: VenueId::from_uuid(parse("id", &row.id)?),
            name: row.name,
            location: row.location,
            capacity: row.capacity,
            description: row.description,
            created_by: UserId::from_uuid(parse("created_by", &row.created_by)?),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

async fn select_venue(conn: &mut MySqlConnection, id: &str) -> BookingResult<Option<Venue>> {
    let row = sqlx::query_as::<_, VenueRow>(&format!(
        "SELECT {} FROM venues WHERE id = ?",
        VENUE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(Venue::try_from).transpose()
}

async fn remove_venue(conn: &mut MySqlConnection, id: VenueId) -> BookingResult<Option<Venue>> {
    let id = id.to_string();
    let Some(venue) = select_venue(&mut *conn, &id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(&id)
        .execute(&mut *conn)
        .await?;

    Ok(Some(venue))
}

#[async_trait]
impl VenueRepository for MySqlVenueRepository {
    async fn count(&self, filter: &VenueFilter) -> BookingResult<i64> {
        debug!("Counting venues for {:?}", filter);

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM venues WHERE (? IS NULL OR location = ?)")
                .bind(&filter.location)
                .bind(&filter.location)
                .fetch_one(self.pool.inner())
                .await?;

        Ok(total)
    }

    async fn find_by_id(&self, id: VenueId) -> BookingResult<Option<Venue>> {
        debug!("Finding venue by id: {}", id);
        let mut conn = self.pool.inner().acquire().await?;
        select_venue(&mut *conn, &id.to_string()).await
    }

    async fn find_many(
        &self,
        filter: &VenueFilter,
        pagination: Pagination,
    ) -> BookingResult<Vec<Venue>> {
        debug!(
            "Finding venues for {:?}, skip {} limit {}",
            filter, pagination.skip, pagination.limit
        );

        let rows = sqlx::query_as::<_, VenueRow>(&format!(
            "SELECT {} FROM venues WHERE (? IS NULL OR location = ?) \
             ORDER BY created_at, id LIMIT ? OFFSET ?",
            VENUE_COLUMNS
        ))
        .bind(&filter.location)
        .bind(&filter.location)
        .bind(pagination.limit)
        .bind(pagination.skip)
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Venue::try_from).collect()
    }

    async fn delete_by_id(&self, id: VenueId) -> BookingResult<Option<Venue>> {
        debug!("Deleting venue: {}", id);

        in_transaction(self.pool.inner(), move |conn| Box::pin(remove_venue(conn, id))).await
    }

    async fn save(&self, venue: &Venue) -> BookingResult<Venue> {
        debug!("Saving venue {} for creator {}", venue.id, venue.created_by);
        let venue = venue.clone();

        in_transaction(self.pool.inner(), move |conn| {
            Box::pin(async move {
                let id = venue.id.to_string();
                let created_by = venue.created_by.to_string();

                let creator: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ?")
                    .bind(&created_by)
                    .fetch_optional(&mut *conn)
                    .await?;
                if creator.is_none() {
                    return Err(BookingError::conflict(format!(
                        "Venue creator {} does not exist",
                        created_by
                    )));
                }

                sqlx::query(
                    r#"
                    INSERT INTO venues (id, name, location, capacity, description,
                                        created_by, created_at, updated_at)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&id)
                .bind(&venue.name)
                .bind(&venue.location)
                .bind(venue.capacity)
                .bind(&venue.description)
                .bind(&created_by)
                .bind(venue.created_at)
                .bind(venue.updated_at)
                .execute(&mut *conn)
                .await?;

                select_venue(conn, &id).await?.ok_or_else(|| {
                    BookingError::Database("Saved venue could not be read back".to_string())
                })
            })
        })
        .await
    }

    async fn update_by_id(
        &self,
        id: VenueId,
        details: &VenueDetails,
    ) -> BookingResult<Option<Venue>> {
        debug!("Updating venue: {}", id);
        let details = details.clone();

        in_transaction(self.pool.inner(), move |conn| {
            Box::pin(async move {
                let id = id.to_string();

                sqlx::query(
                    r#"
                    UPDATE venues
                    SET name = ?, location = ?, capacity = ?, description = ?, updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&details.name)
                .bind(&details.location)
                .bind(details.capacity)
                .bind(&details.description)
                .bind(Utc::now())
                .bind(&id)
                .execute(&mut *conn)
                .await?;

                select_venue(conn, &id).await
            })
        })
        .await
    }
}
