//! Application layer: use cases composed from domain traits.

pub mod click_consumer;
pub mod services;
