//! Capability traits for external collaborators.

mod analytics_repository;
mod click_producer;
mod link_repository;

pub use analytics_repository::AnalyticsRepository;
pub use click_producer::ClickProducer;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use click_producer::MockClickProducer;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
