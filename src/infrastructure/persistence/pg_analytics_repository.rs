//! PostgreSQL implementation of the analytics storage.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, DailyStat};
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

/// PostgreSQL repository for the click-event ledger and daily counters.
pub struct PgAnalyticsRepository {
    pool: Arc<PgPool>,
}

impl PgAnalyticsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DailyStatRow {
    date: NaiveDate,
    count: i64,
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn insert_click_event(&self, event: &ClickEvent) -> Result<bool, AppError> {
        // ON CONFLICT DO NOTHING makes redelivered events a no-op; the
        // returned flag tells the service whether to bump the counter.
        let result = sqlx::query(
            r#"
            INSERT INTO click_events (event_id, link_id, short_code, clicked_at, user_agent, referer, ip)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (event_id) DO NOTHING
            "#,
        )
        .bind(&event.event_id)
        .bind(event.link_id)
        .bind(&event.short_code)
        .bind(event.clicked_at)
        .bind(&event.user_agent)
        .bind(&event.referer)
        .bind(&event.ip)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| AppError::Aggregation(format!("insert click event: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_daily_stat(&self, link_id: i64, date: NaiveDate) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO click_stats_daily (link_id, date, count)
            VALUES ($1, $2, 1)
            ON CONFLICT (link_id, date)
            DO UPDATE SET
                count = click_stats_daily.count + 1,
                updated_at = now()
            "#,
        )
        .bind(link_id)
        .bind(date)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| AppError::Aggregation(format!("increment daily stat: {e}")))?;

        Ok(())
    }

    async fn get_daily_stats(
        &self,
        link_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyStat>, AppError> {
        let rows = sqlx::query_as::<_, DailyStatRow>(
            r#"
            SELECT date, count
            FROM click_stats_daily
            WHERE link_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date ASC
            "#,
        )
        .bind(link_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(|e| AppError::Aggregation(format!("query daily stats: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|r| DailyStat {
                date: r.date,
                count: r.count,
            })
            .collect())
    }
}
