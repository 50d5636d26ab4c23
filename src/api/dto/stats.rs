//! Daily stats endpoint payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::DailyStat;

/// Optional `?from=YYYY-MM-DD&to=YYYY-MM-DD` range. When both are absent
/// the handler defaults to the trailing 30 days; supplying only one of
/// the two is rejected.
#[derive(Debug, Deserialize)]
pub struct DailyStatsQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DailyStatItem {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct DailyStatsResponse {
    pub link_id: i64,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub items: Vec<DailyStatItem>,
}

impl DailyStatsResponse {
    pub fn new(link_id: i64, from: NaiveDate, to: NaiveDate, stats: Vec<DailyStat>) -> Self {
        Self {
            link_id,
            from,
            to,
            items: stats
                .into_iter()
                .map(|stat| DailyStatItem {
                    date: stat.date,
                    count: stat.count,
                })
                .collect(),
        }
    }
}
