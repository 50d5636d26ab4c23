//! POST /api/v1/shorten

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

// Single-tenant deployment; every link belongs to the service owner.
const DEFAULT_OWNER_ID: i64 = 1;

/// Creates a short link for the submitted URL.
pub async fn shorten(
    State(state): State<AppState>,
    Json(request): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let url = request.url.trim().to_string();
    if url.is_empty() {
        return Err(AppError::BadRequest("url must not be empty".to_string()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::BadRequest(
            "url must start with http:// or https://".to_string(),
        ));
    }

    let link = state
        .shortener
        .create_short_link(DEFAULT_OWNER_ID, url)
        .await?;
    let short_url = state.shortener.build_short_url(&link);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::from_link(&link, short_url)),
    ))
}
