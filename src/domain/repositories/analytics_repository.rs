//! Repository trait for the click-event ledger and daily aggregates.

use crate::domain::entities::{ClickEvent, DailyStat};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Durable storage owned exclusively by the aggregation service.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAnalyticsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Appends a raw click event to the ledger.
    ///
    /// `event_id` is the idempotency key: inserting an event that is
    /// already present is not an error.
    ///
    /// # Returns
    ///
    /// `Ok(true)` when a new row was written, `Ok(false)` when the event
    /// was already in the ledger (redelivery).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Aggregation`] on storage failures.
    async fn insert_click_event(&self, event: &ClickEvent) -> Result<bool, AppError>;

    /// Upserts the daily counter for `(link_id, date)`: insert with count 1
    /// or increment the existing row and refresh its update timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Aggregation`] on storage failures.
    async fn increment_daily_stat(&self, link_id: i64, date: NaiveDate) -> Result<(), AppError>;

    /// Returns stored daily rows for the link within `[from, to]`
    /// inclusive, ascending by date. Days without clicks have no row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Aggregation`] on storage failures.
    async fn get_daily_stats(
        &self,
        link_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyStat>, AppError>;
}
