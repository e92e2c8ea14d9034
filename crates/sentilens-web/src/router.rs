//! Axum router — maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    api::api_analyze,
    chat::{chat_submit, relay_chat, relay_generate},
    dashboard::{analyze_submit, dashboard},
    report::download_report,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/", get(dashboard))
        .route("/analyze", post(analyze_submit))
        .route("/chat", post(chat_submit))
        .route("/report", get(download_report))

        // API endpoints
        .route("/api/analyze", post(api_analyze))
        .route("/api/chat", post(relay_generate))
        .route("/api/ollama-chat", post(relay_chat))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
