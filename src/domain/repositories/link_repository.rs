//! Repository trait for the durable link store.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage for links, the single source of truth.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link. The store assigns `id` and the canonical
    /// `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when `(domain, short_code)` already
    /// exists, [`AppError::Persistence`] on other storage failures.
    async fn create_link(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Looks up a link by its external key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if no link matches
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage failures.
    async fn get_by_code(&self, domain: &str, code: &str) -> Result<Option<Link>, AppError>;
}
