//! HTTP surface: JSON API, dashboard endpoints and static pages

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::api::CompletionProvider;
use crate::services::session_service::DashboardSession;
use crate::services::waitlist_service::WaitlistSink;

pub mod dashboard;
pub mod proxy;

/// Named pages and the file in the public directory that backs each
pub const PAGES: [(&str, &str); 5] = [
    ("/", "index.html"),
    ("/docs", "docs.html"),
    ("/ecosystem", "ecosystem.html"),
    ("/router", "router.html"),
    ("/system", "system.html"),
];

pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
    pub waitlist: Arc<dyn WaitlistSink>,
    pub session: Arc<DashboardSession>,
}

pub type SharedState = Arc<AppState>;

/// Create the application router
pub fn create_router(state: SharedState, public_dir: &Path) -> Router {
    let mut app = Router::new()
        .route("/api/chat", post(proxy::chat))
        .route("/api/router", post(proxy::router))
        .route("/api/generate-image", post(proxy::generate_image))
        .route("/api/generate-video", post(proxy::generate_video))
        .route("/api/waitlist", post(proxy::waitlist))
        .route("/api/health", get(proxy::health))
        .route("/api/dashboard/series", get(dashboard::series))
        .route("/api/dashboard/chart", get(dashboard::chart))
        .route("/api/dashboard/chart.png", get(dashboard::chart_png))
        .route("/api/dashboard/range", post(dashboard::set_range))
        .route("/api/dashboard/highlight", post(dashboard::highlight))
        .route("/api/dashboard/live", get(dashboard::live));

    for (path, file) in PAGES {
        app = app.route_service(path, ServeFile::new(public_dir.join(file)));
    }

    app.fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
