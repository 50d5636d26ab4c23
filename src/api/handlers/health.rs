//! GET /healthz

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}
