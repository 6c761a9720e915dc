//! Cache interface trait for abstracted caching operations.

use booking_core::{BookingResult, CacheInvalidator};
use async_trait::async_trait;
use tracing::warn;

/// Cache interface for storing and retrieving cached data.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
/// Whole-cache invalidation comes from [`CacheInvalidator::flush`].
#[async_trait]
pub trait CacheInterface: CacheInvalidator {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> Option<String>;

    /// Set a raw JSON value in the cache.
    async fn set_raw(&self, key: &str, value: String);

    /// Returns the number of live entries.
    async fn entry_count(&self) -> u64;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    ///
    /// An entry that no longer deserializes reads as a miss.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        let json = self.get_raw(key).await?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) -> BookingResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, json).await;
        Ok(())
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
