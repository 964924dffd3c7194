// HTTP routes: JSON API, static dashboard assets, CORS

mod cors;
mod http;

use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::history::HistoryBuffer;
use crate::sysinfo_repo::SysinfoRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) history: Arc<HistoryBuffer>,
    pub(crate) sysinfo_repo: Arc<SysinfoRepo>,
}

pub fn app(
    history: Arc<HistoryBuffer>,
    sysinfo_repo: Arc<SysinfoRepo>,
    config: &AppConfig,
) -> Router {
    let state = AppState {
        history,
        sysinfo_repo,
    };
    Router::new()
        // POST answers like GET.
        .route(
            "/api/system",
            get(http::system_handler).post(http::system_handler),
        ) // GET|POST /api/system
        .route(
            "/api/disks",
            get(http::disks_handler).post(http::disks_handler),
        ) // GET|POST /api/disks
        .route(
            "/api/network",
            get(http::network_handler).post(http::network_handler),
        ) // GET|POST /api/network
        .route("/version", get(http::version_handler)) // GET /version
        .fallback_service(ServeDir::new(&config.server.web_dir))
        .layer(middleware::from_fn(cors::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
