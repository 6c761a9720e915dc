//! Bounded in-process cache backed by moka.

use crate::cache::CacheInterface;
use booking_config::CacheConfig;
use booking_core::{BookingError, BookingResult, CacheInvalidator};
use async_trait::async_trait;
use moka::future::Cache;
use shaku::Component;
use tracing::{debug, info};

/// Least-recently-used cache with a per-entry time to live.
///
/// Built once at startup and registered with the component module. Clones
/// share the same entries.
#[derive(Component, Clone)]
#[shaku(interface = CacheInterface)]
pub struct LruCache {
    entries: Cache<String, String>,
}

impl LruCache {
    /// Creates the cache from configuration.
    ///
    /// Zero capacity or a zero lifetime is rejected.
    pub fn new(config: &CacheConfig) -> BookingResult<Self> {
        if config.max_capacity == 0 {
            return Err(BookingError::Configuration(
                "cache.max_capacity must be positive".to_string(),
            ));
        }
        if config.ttl_secs == 0 {
            return Err(BookingError::Configuration(
                "cache.ttl_secs must be positive".to_string(),
            ));
        }

        let entries = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl())
            .build();

        info!(
            "Cache initialized: capacity {}, ttl {}s",
            config.max_capacity, config.ttl_secs
        );
        Ok(Self { entries })
    }
}

impl From<LruCache> for LruCacheParameters {
    fn from(cache: LruCache) -> Self {
        Self {
            entries: cache.entries,
        }
    }
}

impl std::fmt::Debug for LruCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[async_trait]
impl CacheInvalidator for LruCache {
    async fn flush(&self) {
        self.entries.invalidate_all();
        debug!("Cache flushed");
    }
}

#[async_trait]
impl CacheInterface for LruCache {
    async fn get_raw(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        self.entries.get(key).await
    }

    async fn set_raw(&self, key: &str, value: String) {
        if key.is_empty() {
            return;
        }
        self.entries.insert(key.to_string(), value).await;
    }

    async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}
