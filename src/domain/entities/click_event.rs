//! Click event record published to the click log on every redirect.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current version of the click event wire format.
pub const CLICK_SCHEMA_VERSION: i32 = 1;

/// Event type constant carried in every click event.
pub const CLICK_EVENT_TYPE: &str = "click";

/// A single click on a shortened link.
///
/// Created once per redirect, immutable, and transmitted once into the
/// click log. The wire shape is a stable contract:
/// `{schema_version, event_type, event_id, link_id, short_code, clicked_at,
/// user_agent?, referer?, ip?}` with `clicked_at` as RFC 3339 UTC.
///
/// `event_id` is globally unique and doubles as the idempotency key when
/// the consumer redelivers a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub schema_version: i32,
    pub event_type: String,
    pub event_id: String,
    pub link_id: i64,
    pub short_code: String,
    pub clicked_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl ClickEvent {
    /// Builds a click event with a fresh `event_id`.
    ///
    /// Client metadata is optional; the IP is a best-effort value derived
    /// from the connection's remote address.
    pub fn new(
        link_id: i64,
        short_code: String,
        user_agent: Option<String>,
        referer: Option<String>,
        ip: Option<String>,
        clicked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: CLICK_SCHEMA_VERSION,
            event_type: CLICK_EVENT_TYPE.to_string(),
            event_id: Uuid::new_v4().to_string(),
            link_id,
            short_code,
            clicked_at,
            user_agent,
            referer,
            ip,
        }
    }

    /// Partition/routing key: all events for one link land on one partition.
    pub fn partition_key(&self) -> String {
        self.link_id.to_string()
    }

    /// UTC calendar day the click belongs to for daily aggregation.
    pub fn day(&self) -> NaiveDate {
        self.clicked_at.date_naive()
    }
}
