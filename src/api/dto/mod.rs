//! Request/response payloads for the HTTP API.

mod shorten;
mod stats;

pub use shorten::{ShortenRequest, ShortenResponse};
pub use stats::{DailyStatItem, DailyStatsQuery, DailyStatsResponse};
