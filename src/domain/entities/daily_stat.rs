//! Daily click aggregate for a single link.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated clicks for one link on one UTC calendar day.
///
/// `count` is monotonically increasing: it only ever grows through the
/// upsert-increment in the aggregation service. Days with zero clicks have
/// no row; callers treat absence as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub count: i64,
}
