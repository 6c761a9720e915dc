//! Caching infrastructure for the service layer.
//!
//! One bounded in-process cache holds memoized user lookups and venue list
//! pages as JSON strings.

mod cache_interface;
pub mod cache_keys;
mod flusher;
mod lru_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use flusher::CacheFlusher;
pub use lru_cache::{LruCache, LruCacheParameters};
