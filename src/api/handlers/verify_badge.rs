use super::common::{payload_rejection, HandlerError};
use crate::types::{VerifyBadgeRequest, VerifyBadgeResponse};
use crate::verify::verify_submission;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use std::sync::Arc;
use tracing::info;

/// `POST /verify-badge`: `{ "url", "siteUuid" }` → `{ success, verified }`.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VerifyBadgeRequest>, JsonRejection>,
) -> Result<Json<VerifyBadgeResponse>, HandlerError> {
    let Json(request) = payload.map_err(payload_rejection)?;

    match verify_submission(&state, &request.url, &request.site_uuid).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            info!("verify-badge failed ({}): {}", e.kind(), e);
            Err(e.into_response_parts())
        }
    }
}
