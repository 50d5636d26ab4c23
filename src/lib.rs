//! URL shortener with asynchronous click analytics.
//!
//! Two binaries share this library:
//! - `linkshort` - the HTTP API: create short links, redirect, query
//!   per-day click counts
//! - `analytics_consumer` - folds the Kafka click log into daily counters
//!
//! Redirect lookups run cache-aside over Redis with the Postgres store as
//! the source of truth. Clicks are published fire-and-forget from the
//! redirect path and aggregated at least once on the consumer side, with
//! an event-id constraint absorbing redeliveries.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod metrics;
pub mod server;
pub mod state;
pub mod utils;
