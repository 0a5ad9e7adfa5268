use serde::{Deserialize, Serialize};

/// Body of `POST /verify-badge`.
///
/// Missing fields deserialize as empty strings so that the orchestrator can reject them
/// with a field-specific message instead of a generic payload error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyBadgeRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "siteUuid")]
    pub site_uuid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyBadgeResponse {
    pub success: bool,
    pub verified: bool,
}

impl VerifyBadgeResponse {
    pub fn verified() -> Self {
        Self {
            success: true,
            verified: true,
        }
    }
}

/// Error body shared by every non-2xx response.
///
/// Single-message failures fill `error`; content-check failures fill `errors`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            errors: Vec::new(),
        }
    }

    pub fn list(errors: Vec<String>) -> Self {
        Self {
            success: false,
            error: None,
            errors,
        }
    }
}

/// Result of running both content checks against one page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub success: bool,
    #[serde(rename = "failureReasons")]
    pub failure_reasons: Vec<String>,
}

impl VerificationOutcome {
    pub fn from_failures(failure_reasons: Vec<String>) -> Self {
        Self {
            success: failure_reasons.is_empty(),
            failure_reasons,
        }
    }
}

/// Canonical embed handed to makers by `GET /badge-snippet`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BadgeSnippet {
    pub html: String,
    pub badge_src: String,
    pub badge_alt: String,
    pub link_href: String,
}
