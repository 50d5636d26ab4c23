//! Link creation and cache-aside resolution.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheLookup, LinkCache};
use crate::metrics::Metrics;
use crate::utils::code_generator::CodeGenerator;

/// Default TTL for cached links.
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default TTL for negative-cache markers. Kept short so a link created
/// right after a miss becomes resolvable quickly.
pub const NEGATIVE_CACHE_TTL: Duration = Duration::from_secs(300);

/// How many fresh codes to try when the store reports a collision.
const MAX_CODE_ATTEMPTS: usize = 3;

/// Service for creating and resolving shortened links.
///
/// Owns the cache-aside protocol: the cache is read before and written
/// after every store round trip, and every cache failure is a logged,
/// counted soft failure: the durable store alone decides correctness.
///
/// Safe for unbounded concurrent use; holds no mutable state beyond the
/// injected handles.
pub struct ShortenerService<R: LinkRepository, G: CodeGenerator> {
    repository: Arc<R>,
    cache: Arc<dyn LinkCache>,
    generator: Arc<G>,
    base_url: String,
    cache_ttl: Duration,
    negative_cache_ttl: Duration,
    metrics: Arc<Metrics>,
}

impl<R: LinkRepository, G: CodeGenerator> ShortenerService<R, G> {
    /// Creates a shortener with default TTLs.
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn LinkCache>,
        generator: Arc<G>,
        base_url: String,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            repository,
            cache,
            generator,
            base_url,
            cache_ttl: CACHE_TTL,
            negative_cache_ttl: NEGATIVE_CACHE_TTL,
            metrics,
        }
    }

    /// Overrides the cache TTLs.
    pub fn with_ttls(mut self, cache_ttl: Duration, negative_cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self.negative_cache_ttl = negative_cache_ttl;
        self
    }

    /// Canonical base URL new links are scoped under.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a new short link under the configured base URL.
    ///
    /// Generates a code, persists the link (the store assigns `id` and the
    /// canonical `created_at`), then best-effort fills the cache. On a
    /// short-code collision a fresh code is generated, up to
    /// `MAX_CODE_ATTEMPTS` times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RandomSource`] if entropy fails,
    /// [`AppError::Persistence`] on store failure, and
    /// [`AppError::CodeGeneration`] when collision retries are exhausted.
    /// Cache-write failure is never an error here.
    pub async fn create_short_link(
        &self,
        owner_id: i64,
        original_url: String,
    ) -> Result<Link, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = self.generator.generate_short_code()?;

            let new_link = NewLink {
                owner_id,
                domain: self.base_url.clone(),
                short_code: code,
                original_url: original_url.clone(),
                expires_at: None,
                is_active: true,
            };

            match self.repository.create_link(new_link).await {
                Ok(link) => {
                    self.fill_cache(&link).await;
                    return Ok(link);
                }
                Err(AppError::Conflict(constraint)) => {
                    warn!(constraint = %constraint, "short code collision, regenerating");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::CodeGeneration(format!(
            "gave up after {MAX_CODE_ATTEMPTS} short code collisions"
        )))
    }

    /// Resolves a link by `(domain, code)` using the cache-aside protocol.
    ///
    /// 1. Cache read: a hit short-circuits the store, a negative hit
    ///    short-circuits to `NotFound`, an error logs and falls through.
    /// 2. Store read: a miss writes a not-found marker and fails with
    ///    `NotFound`; other failures propagate.
    /// 3. Best-effort cache fill with the fresh link.
    /// 4. Usability check, evaluated now rather than trusted from the cache.
    ///
    /// A link deactivated or expired after being cached may be served as
    /// usable for up to the TTL window; accepted staleness.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`], [`AppError::NotUsable`], or
    /// [`AppError::Persistence`].
    pub async fn resolve_link(&self, domain: &str, code: &str) -> Result<Link, AppError> {
        match self.cache.get_by_code(domain, code).await {
            Ok(CacheLookup::Hit(link)) => {
                self.metrics.cache_hits.increment(1);
                if !link.is_usable(Utc::now()) {
                    return Err(AppError::NotUsable);
                }
                return Ok(link);
            }
            Ok(CacheLookup::NegativeHit) => {
                self.metrics.cache_hits.increment(1);
                return Err(AppError::NotFound);
            }
            Ok(CacheLookup::Miss) => {
                self.metrics.cache_misses.increment(1);
            }
            Err(e) => {
                // The cache must never be a single point of failure.
                warn!(domain, code, error = %e, "cache read failed, falling back to store");
            }
        }

        let link = match self.repository.get_by_code(domain, code).await? {
            Some(link) => link,
            None => {
                if let Err(e) = self
                    .cache
                    .set_not_found(domain, code, self.negative_cache_ttl)
                    .await
                {
                    self.metrics.cache_write_errors.increment(1);
                    warn!(domain, code, error = %e, "failed to cache not-found marker");
                }
                return Err(AppError::NotFound);
            }
        };

        self.fill_cache(&link).await;

        if !link.is_usable(Utc::now()) {
            return Err(AppError::NotUsable);
        }

        debug!(domain, code, link_id = link.id, "link resolved");
        Ok(link)
    }

    /// Builds the full short URL for a link. Pure concatenation, no I/O.
    pub fn build_short_url(&self, link: &Link) -> String {
        format!("{}/{}", link.domain.trim_end_matches('/'), link.short_code)
    }

    async fn fill_cache(&self, link: &Link) {
        if let Err(e) = self.cache.set_by_code(link, self.cache_ttl).await {
            self.metrics.cache_write_errors.increment(1);
            warn!(
                domain = %link.domain,
                code = %link.short_code,
                error = %e,
                "failed to cache link"
            );
        }
    }
}
