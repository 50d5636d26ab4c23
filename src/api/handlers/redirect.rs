//! GET /{code}

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use chrono::Utc;
use tracing::error;

use crate::domain::entities::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code and redirects with 307.
///
/// The click event is published after the link resolves but before the
/// response; a publish failure is logged and swallowed so analytics can
/// never break a redirect.
pub async fn redirect(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Redirect, AppError> {
    let domain = request_domain(&headers, &state);
    let link = state.shortener.resolve_link(&domain, &code).await?;

    let event = ClickEvent::new(
        link.id,
        link.short_code.clone(),
        header_value(&headers, header::USER_AGENT),
        header_value(&headers, header::REFERER),
        Some(addr.ip().to_string()),
        Utc::now(),
    );

    if let Err(e) = state.clicks.publish_click(&event).await {
        error!(
            link_id = link.id,
            short_code = %link.short_code,
            error = %e,
            "failed to publish click event"
        );
    }

    Ok(Redirect::temporary(&link.original_url))
}

/// Domain the request arrived on, matching the domain links are stored
/// under. Falls back to the configured base URL when the Host header is
/// missing.
fn request_domain(headers: &HeaderMap, state: &AppState) -> String {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|host| format!("http://{host}"))
        .unwrap_or_else(|| state.shortener.base_url().to_string())
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
