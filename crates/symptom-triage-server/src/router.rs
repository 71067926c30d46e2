//! HTTP router.
//!
//! Middleware stack (outermost → innermost):
//! 1. CORS (any origin) → 2. Request tracing

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/schedule", post(handlers::schedule))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
