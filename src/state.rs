//! Shared handler state.

use std::sync::Arc;

use crate::application::services::{AnalyticsService, ShortenerService};
use crate::domain::repositories::ClickProducer;
use crate::infrastructure::persistence::{PgAnalyticsRepository, PgLinkRepository};
use crate::utils::code_generator::RandomCodeGenerator;

/// Shortener wired to the production adapters.
pub type AppShortener = ShortenerService<PgLinkRepository, RandomCodeGenerator>;

/// Analytics queries wired to the production store.
pub type AppAnalytics = AnalyticsService<PgAnalyticsRepository>;

/// State shared across request handlers. Cloned per request; all members
/// are cheap `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<AppShortener>,
    pub analytics: Arc<AppAnalytics>,
    pub clicks: Arc<dyn ClickProducer>,
}
