//! Link cache trait and error types.

use crate::domain::entities::Link;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during cache operations.
///
/// These never propagate out of the resolver: the cache is a disposable
/// accelerator, so failures are logged, counted, and degraded to durable
/// store lookups.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
    CodecError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
            Self::CodecError(e) => write!(f, "Cache codec error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Outcome of a cache lookup.
#[derive(Debug, Clone)]
pub enum CacheLookup {
    /// A cached link. Possibly stale for up to the TTL window; usability is
    /// re-evaluated by the caller, not trusted from the cache.
    Hit(Link),
    /// A cached not-found marker: the key was recently confirmed absent
    /// from the durable store.
    NegativeHit,
    /// Nothing cached; fall through to the durable store.
    Miss,
}

/// TTL-bounded mirror of the durable link store.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisLinkCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - no-op for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkCache: Send + Sync {
    /// Looks up a link (or a not-found marker) by `(domain, code)`.
    async fn get_by_code(&self, domain: &str, code: &str) -> CacheResult<CacheLookup>;

    /// Stores a link under its `(domain, short_code)` key with the given TTL.
    async fn set_by_code(&self, link: &Link, ttl: Duration) -> CacheResult<()>;

    /// Stores a not-found marker so repeated misses skip the durable store.
    async fn set_not_found(&self, domain: &str, code: &str, ttl: Duration) -> CacheResult<()>;
}
