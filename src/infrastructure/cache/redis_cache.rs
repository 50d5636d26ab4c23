//! Redis-backed link cache implementation.

use super::service::{CacheError, CacheLookup, CacheResult, LinkCache};
use crate::domain::entities::Link;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache for fast redirect lookups.
///
/// Uses `ConnectionManager` for connection reuse. Cached links are stored
/// as JSON under `link:{domain}:{code}`; not-found markers live under
/// `link:nf:{domain}:{code}` with their own (shorter) TTL.
pub struct RedisLinkCache {
    client: ConnectionManager,
}

fn link_key(domain: &str, code: &str) -> String {
    format!("link:{}:{}", domain, code)
}

fn not_found_key(domain: &str, code: &str) -> String {
    format!("link:nf:{}:{}", domain, code)
}

impl RedisLinkCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl LinkCache for RedisLinkCache {
    async fn get_by_code(&self, domain: &str, code: &str) -> CacheResult<CacheLookup> {
        let mut conn = self.client.clone();

        let data: Option<Vec<u8>> = conn
            .get(link_key(domain, code))
            .await
            .map_err(|e| CacheError::OperationError(format!("Redis GET failed: {}", e)))?;

        if let Some(bytes) = data {
            let link: Link = serde_json::from_slice(&bytes)
                .map_err(|e| CacheError::CodecError(format!("cached link decode: {}", e)))?;
            debug!(domain, code, "cache hit");
            return Ok(CacheLookup::Hit(link));
        }

        let negative: bool = conn
            .exists(not_found_key(domain, code))
            .await
            .map_err(|e| CacheError::OperationError(format!("Redis EXISTS failed: {}", e)))?;

        if negative {
            debug!(domain, code, "negative cache hit");
            return Ok(CacheLookup::NegativeHit);
        }

        debug!(domain, code, "cache miss");
        Ok(CacheLookup::Miss)
    }

    async fn set_by_code(&self, link: &Link, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.client.clone();

        let data = serde_json::to_vec(link)
            .map_err(|e| CacheError::CodecError(format!("link encode: {}", e)))?;

        conn.set_ex::<_, _, ()>(
            link_key(&link.domain, &link.short_code),
            data,
            ttl.as_secs(),
        )
        .await
        .map_err(|e| CacheError::OperationError(format!("Redis SET failed: {}", e)))?;

        debug!(
            domain = %link.domain,
            code = %link.short_code,
            ttl_seconds = ttl.as_secs(),
            "cached link"
        );
        Ok(())
    }

    async fn set_not_found(&self, domain: &str, code: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(not_found_key(domain, code), "1", ttl.as_secs())
            .await
            .map_err(|e| CacheError::OperationError(format!("Redis SET failed: {}", e)))?;

        debug!(domain, code, "cached not-found marker");
        Ok(())
    }
}
