//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL link.
///
/// `(domain, short_code)` is the sole external lookup key; `id` is assigned
/// by the durable store and stays internal. Links are immutable after
/// creation in this core.
///
/// Serde derives exist because cached copies are stored as JSON in Redis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub owner_id: i64,
    /// Canonical base URL the code is scoped under, e.g. `http://sho.rt`.
    pub domain: String,
    pub short_code: String,
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link may be served: active and not past its
    /// expiry at `now`.
    ///
    /// Usability is always evaluated at lookup time, never baked into a
    /// cached copy; a link cached while usable can expire before the cache
    /// entry does.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => now < expires_at,
            None => true,
        }
    }
}

/// Input data for creating a new link.
///
/// `id` and the canonical `created_at` are assigned by the durable store.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub owner_id: i64,
    pub domain: String,
    pub short_code: String,
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}
