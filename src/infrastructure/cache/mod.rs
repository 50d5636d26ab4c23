//! Caching layer for fast redirect lookups.
//!
//! Provides the [`LinkCache`] trait with two implementations:
//! - [`RedisLinkCache`] - production Redis-backed cache
//! - [`NullCache`] - no-op for disabled caching

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisLinkCache;
pub use service::{CacheError, CacheLookup, CacheResult, LinkCache};

#[cfg(test)]
pub use service::MockLinkCache;
