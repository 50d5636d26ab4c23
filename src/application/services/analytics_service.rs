//! Click aggregation and daily-stats queries.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::entities::{ClickEvent, DailyStat};
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

/// Aggregates click events into per-day counters and serves range queries
/// over them.
pub struct AnalyticsService<R: AnalyticsRepository> {
    repository: Arc<R>,
}

impl<R: AnalyticsRepository> AnalyticsService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Records one click event: inserts the raw event and, when the insert
    /// actually created a row, bumps the daily counter for the event's UTC
    /// day. A duplicate `event_id` leaves the counter untouched, so a
    /// redelivered message never double-counts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Aggregation`] when the store rejects either write.
    pub async fn process_click(&self, event: &ClickEvent) -> Result<(), AppError> {
        let inserted = self.repository.insert_click_event(event).await?;
        if !inserted {
            debug!(event_id = %event.event_id, "duplicate click event, skipping");
            return Ok(());
        }

        self.repository
            .increment_daily_stat(event.link_id, event.day())
            .await
    }

    /// Returns per-day click counts for a link over `[from, to]`, inclusive
    /// on both ends at day granularity. Timestamps are truncated to their
    /// UTC dates before the range check, so `from` and `to` falling on the
    /// same day is a valid one-day range. Days without clicks are absent
    /// from the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRange`] before touching the store when
    /// `from` is after `to`, and [`AppError::Aggregation`] on store failure.
    pub async fn get_daily_stats(
        &self,
        link_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<DailyStat>, AppError> {
        let from_day = from.date_naive();
        let to_day = to.date_naive();

        if from_day > to_day {
            return Err(AppError::InvalidRange {
                from: from_day,
                to: to_day,
            });
        }

        self.repository
            .get_daily_stats(link_id, from_day, to_day)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockAnalyticsRepository;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn event_at(link_id: i64, clicked_at: &str) -> ClickEvent {
        let clicked_at = clicked_at.parse::<DateTime<Utc>>().unwrap();
        ClickEvent::new(link_id, "abc12345".to_string(), None, None, None, clicked_at)
    }

    #[tokio::test]
    async fn test_process_click_inserts_and_increments() {
        let event = event_at(42, "2024-03-05T10:00:00Z");
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let mut repo = MockAnalyticsRepository::new();
        repo.expect_insert_click_event()
            .withf({
                let event_id = event.event_id.clone();
                move |stored| stored.event_id == event_id
            })
            .times(1)
            .returning(|_| Ok(true));
        repo.expect_increment_daily_stat()
            .with(eq(42), eq(day))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = AnalyticsService::new(Arc::new(repo));
        service.process_click(&event).await.unwrap();
    }

    #[tokio::test]
    async fn test_process_click_skips_counter_on_duplicate() {
        let event = event_at(42, "2024-03-05T10:00:00Z");

        let mut repo = MockAnalyticsRepository::new();
        repo.expect_insert_click_event()
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_increment_daily_stat().times(0);

        let service = AnalyticsService::new(Arc::new(repo));
        service.process_click(&event).await.unwrap();
    }

    #[tokio::test]
    async fn test_process_click_propagates_insert_failure() {
        let event = event_at(42, "2024-03-05T10:00:00Z");

        let mut repo = MockAnalyticsRepository::new();
        repo.expect_insert_click_event()
            .times(1)
            .returning(|_| Err(AppError::Aggregation("insert click event: db down".into())));
        repo.expect_increment_daily_stat().times(0);

        let service = AnalyticsService::new(Arc::new(repo));
        let err = service.process_click(&event).await.unwrap_err();
        assert!(matches!(err, AppError::Aggregation(_)));
    }

    #[tokio::test]
    async fn test_get_daily_stats_truncates_to_utc_days() {
        let from = "2024-03-01T23:59:59Z".parse::<DateTime<Utc>>().unwrap();
        let to = "2024-03-07T00:00:01Z".parse::<DateTime<Utc>>().unwrap();

        let mut repo = MockAnalyticsRepository::new();
        repo.expect_get_daily_stats()
            .with(
                eq(42),
                eq(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
                eq(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()),
            )
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![DailyStat {
                    date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                    count: 2,
                }])
            });

        let service = AnalyticsService::new(Arc::new(repo));
        let stats = service.get_daily_stats(42, from, to).await.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].count, 2);
    }

    #[tokio::test]
    async fn test_get_daily_stats_same_day_range_is_valid() {
        let from = "2024-03-05T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let to = "2024-03-05T23:59:59Z".parse::<DateTime<Utc>>().unwrap();

        let mut repo = MockAnalyticsRepository::new();
        repo.expect_get_daily_stats()
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));

        let service = AnalyticsService::new(Arc::new(repo));
        let stats = service.get_daily_stats(42, from, to).await.unwrap();
        assert!(stats.is_empty());
    }

    #[tokio::test]
    async fn test_get_daily_stats_rejects_inverted_range_without_io() {
        let from = "2024-03-07T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let to = "2024-03-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();

        let mut repo = MockAnalyticsRepository::new();
        repo.expect_get_daily_stats().times(0);

        let service = AnalyticsService::new(Arc::new(repo));
        let err = service.get_daily_stats(42, from, to).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRange { .. }));
    }
}
