//! HTTP API surface.

pub mod dto;
pub mod handlers;
pub mod routes;
