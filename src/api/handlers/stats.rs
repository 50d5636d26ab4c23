//! GET /api/v1/links/{id}/stats/daily

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::api::dto::{DailyStatsQuery, DailyStatsResponse};
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_RANGE_DAYS: u64 = 30;

/// Returns per-day click counts for a link.
pub async fn daily_stats(
    State(state): State<AppState>,
    Path(link_id): Path<i64>,
    Query(query): Query<DailyStatsQuery>,
) -> Result<Json<DailyStatsResponse>, AppError> {
    if link_id <= 0 {
        return Err(AppError::BadRequest(
            "link id must be positive".to_string(),
        ));
    }

    let (from, to) = resolve_range(&query)?;

    let stats = state
        .analytics
        .get_daily_stats(link_id, day_start(from), day_start(to))
        .await?;

    Ok(Json(DailyStatsResponse::new(link_id, from, to, stats)))
}

/// Resolves the query range: both bounds given, or neither. With neither,
/// defaults to the trailing 30 days ending today (UTC), today included.
fn resolve_range(query: &DailyStatsQuery) -> Result<(NaiveDate, NaiveDate), AppError> {
    match (query.from.as_deref(), query.to.as_deref()) {
        (Some(from), Some(to)) => Ok((parse_date("from", from)?, parse_date("to", to)?)),
        (None, None) => {
            let today = Utc::now().date_naive();
            // Both bounds are inclusive, so the window spans 29 days back.
            let from = today
                .checked_sub_days(Days::new(DEFAULT_RANGE_DAYS - 1))
                .unwrap_or(today);
            Ok((from, today))
        }
        _ => Err(AppError::BadRequest(
            "from and to must be supplied together".to_string(),
        )),
    }
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("{name} must be a YYYY-MM-DD date")))
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
