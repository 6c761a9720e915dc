//! Cache invalidation handle for the repository layer.

use crate::cache::CacheInterface;
use booking_core::CacheInvalidator;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;

/// Exposes only the flush of the shared cache.
///
/// Repositories depend on [`CacheInvalidator`], not on the service cache, so
/// the module registers this handle for them.
#[derive(Component)]
#[shaku(interface = CacheInvalidator)]
pub struct CacheFlusher {
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl CacheFlusher {
    /// Wraps the cache to flush.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CacheInvalidator for CacheFlusher {
    async fn flush(&self) {
        self.cache.flush().await;
    }
}
