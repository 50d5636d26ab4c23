//! Application services.

mod analytics_service;
mod shortener_service;

pub use analytics_service::AnalyticsService;
pub use shortener_service::{ShortenerService, CACHE_TTL, NEGATIVE_CACHE_TTL};
