//! Venue service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{VenueInput, VenuePage, VenueQuery};
use crate::venue_service::VenueService;
use booking_core::{BookingError, BookingResult, User, Venue, VenueFilter, VenueId};
use booking_repository::VenueRepository;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Page size used when neither the request nor the module sets one.
pub const DEFAULT_QUERY_LIMIT: i64 = 10;

/// Venue service backed by a repository and the shared cache.
#[derive(Component)]
#[shaku(interface = VenueService)]
pub struct VenueServiceImpl {
    #[shaku(inject)]
    venue_repository: Arc<dyn VenueRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_QUERY_LIMIT)]
    default_query_limit: i64,
}

impl VenueServiceImpl {
    /// Creates a new venue service.
    pub fn new(
        venue_repository: Arc<dyn VenueRepository>,
        cache: Arc<dyn CacheInterface>,
        default_query_limit: i64,
    ) -> Self {
        Self {
            venue_repository,
            cache,
            default_query_limit,
        }
    }

    /// Component parameters for a module with a configured page size.
    #[must_use]
    pub fn parameters(default_query_limit: i64) -> VenueServiceImplParameters {
        VenueServiceImplParameters {
            default_query_limit,
        }
    }

    fn parse_id(id: &str) -> BookingResult<VenueId> {
        VenueId::parse(id).map_err(|_| {
            debug!("Malformed venue id: {}", id);
            BookingError::general()
        })
    }

    async fn load_page(&self, filter: &VenueFilter) -> BookingResult<VenuePage> {
        let venues = self
            .venue_repository
            .find_many(filter, filter.pagination())
            .await;
        let total = self.venue_repository.count(filter).await;

        match (venues, total) {
            (Ok(venues), Ok(total)) => Ok(VenuePage {
                limit: filter.limit,
                page: filter.page,
                venues,
                total,
            }),
            (Err(e), _) | (_, Err(e)) => {
                error!("Could not list venues: {}", e);
                Err(BookingError::general())
            }
        }
    }
}

/// Collapses absence and store faults into `General`.
fn found(result: BookingResult<Option<Venue>>, id: &str) -> BookingResult<Venue> {
    match result {
        Ok(Some(venue)) => Ok(venue),
        Ok(None) => {
            debug!("Venue not found: {}", id);
            Err(BookingError::general())
        }
        Err(e) => {
            error!("Venue {} lookup failed: {}", id, e);
            Err(BookingError::general())
        }
    }
}

#[async_trait]
impl VenueService for VenueServiceImpl {
    async fn add_venue(&self, input: VenueInput, creator: &User) -> BookingResult<Venue> {
        debug!("Adding venue: {}", input.name);

        let venue = Venue::new(input.into(), creator.id);
        let saved = self.venue_repository.save(&venue).await.map_err(|e| {
            warn!("Could not save venue: {}", e);
            BookingError::general()
        })?;

        info!("Venue added: {}", saved.id);
        Ok(saved)
    }

    async fn get_venue_by_id(&self, id: &str) -> BookingResult<Venue> {
        debug!("Getting venue: {}", id);

        let venue_id = Self::parse_id(id)?;
        found(self.venue_repository.find_by_id(venue_id).await, id)
    }

    async fn get_many_venues(&self, query: VenueQuery) -> BookingResult<VenuePage> {
        let filter = VenueFilter::new(
            query.limit,
            query.page,
            query.location,
            self.default_query_limit,
        );
        debug!("Listing venues: {:?}", filter);

        let cache_key = cache_keys::venue_query_key(&filter)?;
        if let Some(cached) = self.cache.get::<VenuePage>(&cache_key).await {
            debug!("Cache hit for venue query");
            return Ok(cached);
        }

        let page = self.load_page(&filter).await?;
        if let Err(e) = self.cache.set(&cache_key, &page).await {
            warn!("Could not cache venue page: {}", e);
        }
        Ok(page)
    }

    async fn modify_venue(&self, id: &str, input: VenueInput) -> BookingResult<Venue> {
        debug!("Modifying venue: {}", id);

        let venue_id = Self::parse_id(id)?;
        let venue = found(
            self.venue_repository
                .update_by_id(venue_id, &input.into())
                .await,
            id,
        )?;

        info!("Venue modified: {}", id);
        Ok(venue)
    }

    async fn remove_venue(&self, id: &str) -> BookingResult<Venue> {
        debug!("Removing venue: {}", id);

        let venue_id = Self::parse_id(id)?;
        let venue = found(self.venue_repository.delete_by_id(venue_id).await, id)?;

        info!("Venue removed: {}", id);
        Ok(venue)
    }
}

impl std::fmt::Debug for VenueServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VenueServiceImpl")
            .field("default_query_limit", &self.default_query_limit)
            .finish_non_exhaustive()
    }
}
