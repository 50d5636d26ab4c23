//! Infrastructure layer: concrete adapters behind the domain traits.

pub mod cache;
pub mod kafka;
pub mod persistence;
