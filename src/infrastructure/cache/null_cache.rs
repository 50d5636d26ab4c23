//! No-op cache implementation for disabled caching.

use super::service::{CacheLookup, CacheResult, LinkCache};
use crate::domain::entities::Link;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache that stores nothing.
///
/// Used when Redis is not configured or its connection fails at startup;
/// every lookup misses and every write succeeds immediately, so the
/// resolver degrades to store-only operation.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkCache for NullCache {
    async fn get_by_code(&self, _domain: &str, _code: &str) -> CacheResult<CacheLookup> {
        Ok(CacheLookup::Miss)
    }

    async fn set_by_code(&self, _link: &Link, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn set_not_found(&self, _domain: &str, _code: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }
}
