//! Route table for the API server.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::state::AppState;

/// Builds the application router.
///
/// The catch-all `/{code}` redirect route is registered last so the
/// explicit routes take precedence.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/api/v1/shorten", post(handlers::shorten))
        .route("/api/v1/links/{id}/stats/daily", get(handlers::daily_stats))
        .route("/{code}", get(handlers::redirect))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
