use crate::types::BadgeSnippet;
use crate::verify::badge_snippet;
use crate::AppState;
use axum::extract::State;
use axum::response::Json;
use std::sync::Arc;

pub async fn handle(State(state): State<Arc<AppState>>) -> Json<BadgeSnippet> {
    Json(badge_snippet(&state.policy))
}
