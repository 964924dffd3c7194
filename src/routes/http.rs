// GET handlers: history, live disks/network, version

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;

/// GET/POST /api/system — every buffered snapshot, oldest first (`[]` before the first tick).
pub(super) async fn system_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.history.snapshot())
}

/// GET/POST /api/disks — partitions queried from the OS on each request.
pub(super) async fn disks_handler(State(state): State<AppState>) -> Response {
    match state.sysinfo_repo.list_disks().await {
        Ok(disks) => Json(disks).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, operation = "list_disks", "disk listing failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// GET/POST /api/network — interfaces queried from the OS on each request.
pub(super) async fn network_handler(State(state): State<AppState>) -> Response {
    match state.sysinfo_repo.list_interfaces().await {
        Ok(interfaces) => Json(interfaces).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, operation = "list_interfaces", "interface listing failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
