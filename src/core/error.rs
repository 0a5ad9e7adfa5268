use axum::http::StatusCode;
use axum::response::Json;
use thiserror::Error;

use super::types::ErrorResponse;

/// Shown to the maker whenever their page could not be fetched. Upstream detail stays in logs.
pub const UPSTREAM_RETRY_MESSAGE: &str =
    "We couldn't load your website right now. Please make sure it is online and try again in a few minutes.";

/// Shown when the submission store itself fails.
pub const STORAGE_FAILURE_MESSAGE: &str =
    "Verification succeeded but could not be saved. Please try again shortly.";

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("{0}")]
    InvalidUrl(String),

    #[error("missing submission id")]
    MissingSubmissionId,

    /// Network failure, timeout, or non-2xx status. The detail is for logs only.
    #[error("upstream fetch failed: {0}")]
    UpstreamFetchFailed(String),

    #[error("content validation failed: {}", .0.join(" "))]
    ContentValidationFailed(Vec<String>),

    #[error("submission not found: {0}")]
    SubmissionNotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl VerifyError {
    pub fn status(&self) -> StatusCode {
        match self {
            VerifyError::InvalidPayload(_)
            | VerifyError::InvalidUrl(_)
            | VerifyError::MissingSubmissionId => StatusCode::BAD_REQUEST,
            VerifyError::UpstreamFetchFailed(_) => StatusCode::BAD_GATEWAY,
            VerifyError::ContentValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            VerifyError::SubmissionNotFound(_) => StatusCode::NOT_FOUND,
            VerifyError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable name, used in logs and by the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyError::InvalidPayload(_) => "InvalidPayload",
            VerifyError::InvalidUrl(_) => "InvalidUrl",
            VerifyError::MissingSubmissionId => "MissingSubmissionId",
            VerifyError::UpstreamFetchFailed(_) => "UpstreamFetchFailed",
            VerifyError::ContentValidationFailed(_) => "ContentValidationFailed",
            VerifyError::SubmissionNotFound(_) => "SubmissionNotFound",
            VerifyError::Storage(_) => "Storage",
        }
    }

    /// The body the end user sees. Never carries upstream or storage internals.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            VerifyError::InvalidPayload(_) => {
                ErrorResponse::message("Invalid request body. Expected JSON with \"url\" and \"siteUuid\".")
            }
            VerifyError::InvalidUrl(msg) => ErrorResponse::message(msg.clone()),
            VerifyError::MissingSubmissionId => {
                ErrorResponse::message("Missing submission id (\"siteUuid\").")
            }
            VerifyError::UpstreamFetchFailed(_) => ErrorResponse::message(UPSTREAM_RETRY_MESSAGE),
            VerifyError::ContentValidationFailed(errors) => ErrorResponse::list(errors.clone()),
            VerifyError::SubmissionNotFound(_) => {
                ErrorResponse::message("Submission not found. Please reload the page and try again.")
            }
            VerifyError::Storage(_) => ErrorResponse::message(STORAGE_FAILURE_MESSAGE),
        }
    }

    pub fn into_response_parts(self) -> (StatusCode, Json<ErrorResponse>) {
        (self.status(), Json(self.to_error_response()))
    }
}
