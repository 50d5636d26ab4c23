//! Core domain entities.

mod click_event;
mod daily_stat;
mod link;

pub use click_event::{CLICK_EVENT_TYPE, CLICK_SCHEMA_VERSION, ClickEvent};
pub use daily_stat::DailyStat;
pub use link::{Link, NewLink};
