pub mod handlers;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::health::handle))
        .route("/health", get(handlers::health::handle))
        .route("/verify-badge", post(handlers::verify_badge::handle))
        .route("/badge-snippet", get(handlers::badge_snippet::handle))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
