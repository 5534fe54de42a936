//! API routes.
//!
//! - `POST /create-video` — images + music in, MP4 attachment out.
//! - `GET  /health`       — liveness probe.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use super::state::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create-video", post(handlers::create_video))
        .route("/health", get(handlers::health))
}
