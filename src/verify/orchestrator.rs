use super::{check_page, BadgePolicy};
use crate::core::error::VerifyError;
use crate::scraping::{FetchError, PageFetcher};
use crate::types::{VerificationOutcome, VerifyBadgeResponse};
use crate::AppState;
use tracing::{error, info, warn};
use url::Url;

/// A validated verification call: absolute http(s) URL plus a non-empty submission id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub target_url: Url,
    pub submission_id: String,
}

impl VerificationRequest {
    pub fn parse(url: &str, submission_id: &str) -> Result<Self, VerifyError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(VerifyError::InvalidUrl(
                "Please enter the URL of the page where you added the badge.".to_string(),
            ));
        }
        let submission_id = submission_id.trim();
        if submission_id.is_empty() {
            return Err(VerifyError::MissingSubmissionId);
        }
        Ok(Self {
            target_url: parse_target_url(url)?,
            submission_id: submission_id.to_string(),
        })
    }
}

/// Absolute `http`/`https` URL with a host, or `InvalidUrl`.
pub fn parse_target_url(raw: &str) -> Result<Url, VerifyError> {
    let invalid = || {
        VerifyError::InvalidUrl(
            "Please enter a valid URL starting with http:// or https://.".to_string(),
        )
    };
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url)
}

/// Fetch `url` and run both content checks. Touches no store.
///
/// Fetch failures of any kind become `UpstreamFetchFailed`; upstream detail is only logged
/// when the fetcher is configured to log it.
pub async fn check_url(
    fetcher: &PageFetcher,
    policy: &BadgePolicy,
    url: &Url,
) -> Result<VerificationOutcome, VerifyError> {
    let page = match fetcher.fetch_html(url).await {
        Ok(page) => page,
        Err(e) => {
            if fetcher.settings().log_upstream_detail {
                warn!("Badge fetch failed for {}: {} (timeout: {})", url, e, e.is_timeout());
            } else {
                warn!("Badge fetch failed for {}", url);
            }
            let detail = match &e {
                FetchError::Status(status) => format!("HTTP {}", status.as_u16()),
                FetchError::Request(err) if err.is_timeout() => "timeout".to_string(),
                FetchError::Request(_) => "network error".to_string(),
            };
            return Err(VerifyError::UpstreamFetchFailed(detail));
        }
    };

    if page.truncated {
        info!(
            "Page {} exceeded {} bytes; checking truncated body",
            page.final_url,
            fetcher.settings().max_body_bytes
        );
    }

    Ok(check_page(&page.html, policy))
}

/// Full verification flow: validate → fetch → check → mark verified.
///
/// Re-verifying an already verified submission runs every step again and re-writes the
/// flag; a repeated success is not an error.
pub async fn verify_submission(
    state: &AppState,
    url: &str,
    submission_id: &str,
) -> Result<VerifyBadgeResponse, VerifyError> {
    let request = VerificationRequest::parse(url, submission_id)?;
    info!(
        "Verifying badge for submission {} at {}",
        request.submission_id, request.target_url
    );

    let outcome = check_url(&state.fetcher, &state.policy, &request.target_url).await?;
    if !outcome.success {
        info!(
            "Badge verification rejected for {}: {} check(s) failed",
            request.submission_id,
            outcome.failure_reasons.len()
        );
        return Err(VerifyError::ContentValidationFailed(outcome.failure_reasons));
    }

    let matched = state
        .store
        .mark_verified(&request.submission_id)
        .await
        .map_err(|e| {
            error!(
                "Failed to persist verification for {}: {:#}",
                request.submission_id, e
            );
            VerifyError::Storage(e)
        })?;

    if !matched {
        warn!("Verified page for unknown submission {}", request.submission_id);
        return Err(VerifyError::SubmissionNotFound(request.submission_id));
    }

    info!("Submission {} verified", request.submission_id);
    Ok(VerifyBadgeResponse::verified())
}
