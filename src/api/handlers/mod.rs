//! HTTP request handlers.

mod health;
mod redirect;
mod shorten;
mod stats;

pub use health::healthz;
pub use redirect::redirect;
pub use shorten::shorten;
pub use stats::daily_stats;
