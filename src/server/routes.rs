// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{metrics_handler, root_handler, scan_handler};
use super::middleware::{cors_layer, request_id_layers};
use crate::analyzer::ProductAnalyzer;
use crate::config::AppConfig;
use axum::extract::DefaultBodyLimit;
use axum::{routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn ProductAnalyzer>,
}

pub fn create_router(config: &AppConfig, analyzer: Arc<dyn ProductAnalyzer>) -> Router {
    let state = AppState { analyzer };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let api_v1 = Router::new().route("/scan", post(scan_handler));

    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1", api_v1)
        // Uploads are bounded by our own limit instead of axum's 2MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.server.max_upload_bytes))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
