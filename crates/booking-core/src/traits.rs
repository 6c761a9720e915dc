//! Cross-layer seams.

use crate::Interface;
use async_trait::async_trait;

/// Whole-cache invalidation hook.
///
/// Repositories hold this instead of the full cache so that every write path
/// that changes user data can drop memoized reads without depending on the
/// service layer.
#[async_trait]
pub trait CacheInvalidator: Interface + Send + Sync {
    /// Clears every cached entry.
    async fn flush(&self);
}

