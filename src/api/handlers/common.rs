use crate::types::ErrorResponse;
use crate::VerifyError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use tracing::debug;

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Map an axum JSON extraction failure (bad syntax, wrong content type, wrong shape) to
/// `InvalidPayload`.
pub fn payload_rejection(rejection: JsonRejection) -> HandlerError {
    debug!("Rejected request body: {}", rejection.body_text());
    VerifyError::InvalidPayload(rejection.body_text()).into_response_parts()
}
