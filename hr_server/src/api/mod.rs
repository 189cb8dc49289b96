//! HTTP API for the hand replay backend.
//!
//! A small read-only REST surface over a directory of recorded hands:
//!
//! ```text
//! GET /health                      - Server health status
//! GET /api/hands                   - List available hands
//! GET /api/hands/{hand_id}         - One parsed hand record
//! GET /api/hands/{hand_id}/replay  - The hand's full snapshot sequence
//! ```
//!
//! Built with axum; CORS is configured permissively so a dev frontend on
//! another port can fetch hands directly.

pub mod hands;

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::store::HandStore;

/// Application state shared across all HTTP handlers. Cloned per request;
/// cheap because the store is behind an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<HandStore>,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/hands", get(hands::list_hands))
        .route("/api/hands/{hand_id}", get(hands::get_hand))
        .route("/api/hands/{hand_id}/replay", get(hands::get_replay))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5000/health
/// # {"status":"healthy","version":"0.1.0","hands":10000}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "hands": state.store.len(),
    }))
}
