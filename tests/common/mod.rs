//! In-memory fakes shared by the integration tests.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use linkshort::application::click_consumer::{ClickMessage, ClickSource};
use linkshort::domain::entities::{ClickEvent, DailyStat, Link, NewLink};
use linkshort::domain::repositories::{AnalyticsRepository, LinkRepository};
use linkshort::error::AppError;
use linkshort::infrastructure::cache::{CacheLookup, CacheResult, LinkCache};

/// Link store keyed by `(domain, short_code)`, enforcing the same unique
/// constraint as the Postgres schema.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<(String, String), Link>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create_link(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();
        let key = (new_link.domain.clone(), new_link.short_code.clone());
        if links.contains_key(&key) {
            return Err(AppError::Conflict("links_domain_short_code_key".into()));
        }

        let link = Link {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            owner_id: new_link.owner_id,
            domain: new_link.domain,
            short_code: new_link.short_code,
            original_url: new_link.original_url,
            expires_at: new_link.expires_at,
            is_active: new_link.is_active,
            created_at: Utc::now(),
        };
        links.insert(key, link.clone());
        Ok(link)
    }

    async fn get_by_code(&self, domain: &str, code: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.get(&(domain.to_string(), code.to_string())).cloned())
    }
}

/// Analytics store with the same idempotency behavior as Postgres: an
/// already-seen `event_id` makes the insert a no-op.
#[derive(Default)]
pub struct InMemoryAnalyticsRepository {
    seen_events: Mutex<HashSet<String>>,
    counters: Mutex<BTreeMap<(i64, NaiveDate), i64>>,
}

impl InMemoryAnalyticsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_for(&self, link_id: i64, date: NaiveDate) -> i64 {
        *self
            .counters
            .lock()
            .unwrap()
            .get(&(link_id, date))
            .unwrap_or(&0)
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryAnalyticsRepository {
    async fn insert_click_event(&self, event: &ClickEvent) -> Result<bool, AppError> {
        let mut seen = self.seen_events.lock().unwrap();
        Ok(seen.insert(event.event_id.clone()))
    }

    async fn increment_daily_stat(&self, link_id: i64, date: NaiveDate) -> Result<(), AppError> {
        let mut counters = self.counters.lock().unwrap();
        *counters.entry((link_id, date)).or_insert(0) += 1;
        Ok(())
    }

    async fn get_daily_stats(
        &self,
        link_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyStat>, AppError> {
        let counters = self.counters.lock().unwrap();
        Ok(counters
            .iter()
            .filter(|((id, date), _)| *id == link_id && *date >= from && *date <= to)
            .map(|((_, date), count)| DailyStat {
                date: *date,
                count: *count,
            })
            .collect())
    }
}

/// Cache fake backed by a map, without TTL expiry.
#[derive(Default)]
pub struct InMemoryLinkCache {
    entries: Mutex<HashMap<(String, String), CacheLookup>>,
}

impl InMemoryLinkCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkCache for InMemoryLinkCache {
    async fn get_by_code(&self, domain: &str, code: &str) -> CacheResult<CacheLookup> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(&(domain.to_string(), code.to_string()))
            .cloned()
            .unwrap_or(CacheLookup::Miss))
    }

    async fn set_by_code(&self, link: &Link, _ttl: Duration) -> CacheResult<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            (link.domain.clone(), link.short_code.clone()),
            CacheLookup::Hit(link.clone()),
        );
        Ok(())
    }

    async fn set_not_found(&self, domain: &str, code: &str, _ttl: Duration) -> CacheResult<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            (domain.to_string(), code.to_string()),
            CacheLookup::NegativeHit,
        );
        Ok(())
    }
}

/// Message source fed from a fixed script. Once the script is exhausted,
/// `recv` pends forever so the consumer idles until cancelled.
pub struct ScriptedClickSource {
    queue: Mutex<VecDeque<ClickMessage>>,
    committed: Mutex<Vec<i64>>,
}

impl ScriptedClickSource {
    pub fn new(messages: Vec<ClickMessage>) -> Self {
        Self {
            queue: Mutex::new(messages.into()),
            committed: Mutex::new(Vec::new()),
        }
    }

    pub fn committed_offsets(&self) -> Vec<i64> {
        self.committed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClickSource for ScriptedClickSource {
    async fn recv(&self) -> Result<ClickMessage, AppError> {
        let next = self.queue.lock().unwrap().pop_front();
        match next {
            Some(message) => Ok(message),
            None => std::future::pending().await,
        }
    }

    async fn commit(&self, message: &ClickMessage) -> Result<(), AppError> {
        self.committed.lock().unwrap().push(message.offset);
        Ok(())
    }
}
