//! Domain layer: entities and the capability traits the services depend on.

pub mod entities;
pub mod repositories;
