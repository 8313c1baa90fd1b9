//! HTTP API handlers

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::config::Config;
use crate::theme::{Theme, REVEAL_DELAY, STORAGE_KEY};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Pre-rendered demo page (the markup never changes at runtime)
    pub page: Arc<str>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            page: crate::app::render_page(&config.title, &config.bundle).into(),
        }
    }
}

/// General status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub storage_key: &'static str,
    pub default_theme: Theme,
    pub reveal_delay_ms: u64,
}

/// GET / - Demo page
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.page.to_string())
}

/// GET /status - Service health check
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "dark-mode",
        version: env!("CARGO_PKG_VERSION"),
        storage_key: STORAGE_KEY,
        default_theme: Theme::default(),
        reveal_delay_ms: u64::try_from(REVEAL_DELAY.as_millis()).unwrap_or(u64::MAX),
    })
}

/// Builds the application router.
pub fn router(config: &Config) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/status", get(status_handler))
        .nest_service("/pkg", ServeDir::new(&config.assets_dir))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(config))
}
