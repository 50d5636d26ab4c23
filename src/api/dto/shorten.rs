//! Shorten endpoint payloads.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub id: String,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
}

impl ShortenResponse {
    pub fn from_link(link: &Link, short_url: String) -> Self {
        Self {
            id: link.id.to_string(),
            short_code: link.short_code.clone(),
            short_url,
            original_url: link.original_url.clone(),
        }
    }
}
